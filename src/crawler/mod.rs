//! Crawler module: the crawl/extract engine
//!
//! This module contains the core crawling logic, layered leaf-first:
//! - HTTP fetching with the one-shot 429 retry (`fetcher`)
//! - Politeness delays between requests (`pacing`)
//! - Schema-driven field extraction (`extractor`)
//! - Per-item crawling with failure isolation (`item`)
//! - Per-page listing crawl (`page`)
//! - Run coordination over the page range (`coordinator`)

mod coordinator;
mod extractor;
mod fetcher;
mod item;
mod page;
mod pacing;

pub use coordinator::{run_query, CrawlRun, PageFetchError, RunOutput};
pub use extractor::{
    apply_schema, extract, Field, FieldSpec, Rule, ARTICLE_DETAIL_SCHEMA, CASE_DETAIL_SCHEMA,
};
pub use fetcher::{build_http_client, FetchError, FetchResponse, RateLimitedFetcher};
pub use item::{AssetError, ItemCrawler, ItemError};
pub use page::{enumerate_stubs, result_selector, PageCrawler, PageError};
pub use pacing::Pacer;
