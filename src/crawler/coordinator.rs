//! Crawl run coordination
//!
//! A [`CrawlRun`] drives the page crawler over the query's bounded page
//! range, folding each page's records into one owned [`RunResult`]. Page
//! results accumulate strictly in ascending order; the first listing-page
//! failure aborts the run with the offending page index, the underlying
//! cause, and whatever pages had already completed.

use crate::config::Config;
use crate::crawler::fetcher::RateLimitedFetcher;
use crate::crawler::page::{PageCrawler, PageError};
use crate::crawler::pacing::Pacer;
use crate::query::SearchQuery;
use crate::records::{AssetSaveOutcome, RunResult};
use crate::state::RunState;
use crate::ScrapeError;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Terminal failure of a crawl run
///
/// Carries the page the run stopped on, the underlying cause, and the
/// results of the pages that completed before it. There is no retry or
/// resume: a failed run is restarted from page 1 by the caller.
#[derive(Debug, Error)]
#[error("Failed on page {page}: {source}")]
pub struct PageFetchError {
    /// 1-based index of the page whose listing fetch failed
    pub page: u32,

    #[source]
    pub source: PageError,

    /// Results of the pages completed before the failure
    pub partial: RunResult,
}

/// Everything one completed run hands to the caller
#[derive(Debug)]
pub struct RunOutput {
    pub results: RunResult,
    pub assets: AssetSaveOutcome,
}

/// One bounded execution of the crawler for one query
pub struct CrawlRun {
    fetcher: RateLimitedFetcher,
    pacer: Pacer,
    query: SearchQuery,
    base: Url,
    asset_dir: Option<PathBuf>,
    assets: AssetSaveOutcome,
    state: RunState,
}

impl CrawlRun {
    /// Prepares a run: client, pacing, and (when image saving was
    /// requested) a fresh run-scoped image directory
    ///
    /// The directory is created and the [`AssetSaveOutcome`] fixed before
    /// any crawling starts; individual image failures later never change it.
    pub fn new(config: &Config, query: SearchQuery, save_images: bool) -> Result<Self, ScrapeError> {
        let fetcher = RateLimitedFetcher::new(&config.fetch)?;
        let pacer = Pacer::new(&config.pacing);
        let base = Url::parse(&config.source.base_url)?;

        let (asset_dir, assets) = if save_images {
            let dir_name = format!("{}_{}", query.label(), Local::now().format("%Y%m%d_%H%M%S"));
            let dir = Path::new(&config.output.image_dir).join(dir_name);
            std::fs::create_dir_all(&dir)?;
            // Report the absolute path; the caller may be anywhere
            let absolute = std::fs::canonicalize(&dir)?;
            tracing::info!("Saving images to {}", absolute.display());
            (
                Some(absolute.clone()),
                AssetSaveOutcome {
                    saved: true,
                    directory: Some(absolute),
                },
            )
        } else {
            (None, AssetSaveOutcome::default())
        };

        Ok(Self {
            fetcher,
            pacer,
            query,
            base,
            asset_dir,
            assets,
            state: RunState::Pending,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn asset_outcome(&self) -> &AssetSaveOutcome {
        &self.assets
    }

    /// Crawls pages 1..=N sequentially
    ///
    /// Each successful page appends its records under `page_<n>`; the first
    /// page failure aborts the run immediately, so later pages are never
    /// requested and never appear in the partial result.
    pub async fn run(&mut self) -> Result<RunOutput, PageFetchError> {
        let started = Instant::now();
        tracing::info!(
            "Starting run: scope={}, pages={}",
            self.query.scope().as_str(),
            self.query.pages()
        );

        let mut results = RunResult::new();
        let page_crawler = PageCrawler::new(
            &self.fetcher,
            &self.pacer,
            &self.query,
            &self.base,
            self.asset_dir.as_deref(),
        );

        for page in 1..=self.query.pages() {
            self.state = RunState::Running(page);

            match page_crawler.crawl_page(page).await {
                Ok(records) => {
                    tracing::info!("Page {} complete: {} records", page, records.len());
                    results.insert_page(page, records);
                }
                Err(source) => {
                    self.state = RunState::Failed(page);
                    tracing::error!("Run failed on page {}: {}", page, source);
                    return Err(PageFetchError {
                        page,
                        source,
                        partial: results,
                    });
                }
            }
        }

        self.state = RunState::Completed;
        tracing::info!(
            "Run completed: {} records across {} pages in {:?}",
            results.total_records(),
            results.page_count(),
            started.elapsed()
        );

        Ok(RunOutput {
            results,
            assets: self.assets.clone(),
        })
    }
}

/// Runs a complete crawl for one query
///
/// This is the main library entry point: it builds the run from the
/// configuration, executes it, and surfaces a page failure as an error.
///
/// # Example
///
/// ```no_run
/// use radscrape::config::Config;
/// use radscrape::crawler::run_query;
/// use radscrape::query::{Scope, SearchQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let query = SearchQuery::recent(Scope::Cases, 2)?;
/// let output = run_query(&Config::default(), query, false).await?;
/// println!("{} records", output.results.total_records());
/// # Ok(())
/// # }
/// ```
pub async fn run_query(
    config: &Config,
    query: SearchQuery,
    save_images: bool,
) -> Result<RunOutput, ScrapeError> {
    let mut run = CrawlRun::new(config, query, save_images)?;
    Ok(run.run().await?)
}
