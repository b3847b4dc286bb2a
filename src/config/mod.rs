//! Configuration module for radscrape
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default matching the scraped origin's observed
//! tolerances, so the scraper also runs without any configuration file.
//!
//! # Example
//!
//! ```no_run
//! use radscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Item delay: {}-{}ms", config.pacing.item_delay_min_ms, config.pacing.item_delay_max_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, PacingConfig, SourceConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
