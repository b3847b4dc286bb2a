//! Radscrape: a polite scraper for the Radiopaedia search index
//!
//! This crate crawls paginated article/case search results, follows each hit
//! to its detail page, extracts structured fields from the markup, and can
//! persist each case's thumbnail image. Crawls are bounded (at most five
//! listing pages), strictly sequential, and paced to avoid rate limiting.

pub mod config;
pub mod crawler;
pub mod output;
pub mod query;
pub mod records;
pub mod state;

use thiserror::Error;

/// Main error type for radscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    PageFetch(#[from] crawler::PageFetchError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while constructing a search query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Page count {0} is out of range (must be 1..=5)")]
    PageCount(u32),

    #[error("Section filters only apply to the articles scope")]
    SectionRequiresArticles,

    #[error("The 'Not Applicable' system only exists for cases")]
    SystemRequiresCases,

    #[error("A query may carry either a filter or a recency sort, not both")]
    FilterWithSort,

    #[error("A query may filter by section or by system, not both")]
    FilterConflict,

    #[error("Unknown {kind} name: {name}")]
    UnknownFilter { kind: &'static str, name: String },
}

/// Result type alias for radscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_query, CrawlRun, RunOutput};
pub use query::{Scope, SearchQuery, SortMode};
pub use records::{AssetSaveOutcome, Record, RunResult};
pub use state::RunState;
