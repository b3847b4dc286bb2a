//! Per-item crawling with failure isolation
//!
//! One broken item must never abort its page. Everything that can fail
//! below this boundary (detail fetch, extraction, image fetch, image write)
//! is caught here and degrades the item to whatever partial record had been
//! assembled so far. At minimum every item keeps its identifier and the URL
//! captured from its listing stub.

use crate::crawler::extractor::{self, ARTICLE_DETAIL_SCHEMA, CASE_DETAIL_SCHEMA};
use crate::crawler::fetcher::{FetchError, RateLimitedFetcher};
use crate::query::Scope;
use crate::records::{Record, ResultStub};
use scraper::Html;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Any failure while crawling one item; always swallowed at the item boundary
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Any failure while persisting one item's image; always swallowed
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("image write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Crawls one listing entry into a [`Record`]
pub struct ItemCrawler<'a> {
    fetcher: &'a RateLimitedFetcher,
    scope: Scope,
    asset_dir: Option<&'a Path>,
}

impl<'a> ItemCrawler<'a> {
    /// `asset_dir` is the run-scoped image directory; `None` disables image
    /// persistence for the run.
    pub fn new(fetcher: &'a RateLimitedFetcher, scope: Scope, asset_dir: Option<&'a Path>) -> Self {
        Self {
            fetcher,
            scope,
            asset_dir,
        }
    }

    /// Crawls one stub; never raises past this boundary
    ///
    /// The case identifier is generated before any network activity so the
    /// image filename stays stable and referenceable even when every fetch
    /// afterwards fails. `image_url` records the *source* URL regardless of
    /// whether the bytes were persisted locally.
    pub async fn crawl(&self, stub: &ResultStub) -> Record {
        let mut record = Record::with_url(&stub.url);

        if self.scope == Scope::Cases {
            record.patient_id = Some(Uuid::new_v4().to_string());
            // Listing-only fields: the case title and thumbnail are not on
            // the detail page.
            record.title = stub.title.clone();
            record.image_url = stub.image_url.clone();
        }

        if let Err(e) = self.enrich_from_detail(&mut record).await {
            tracing::debug!("Keeping partial record for {}: {}", stub.url, e);
        }

        if let Some(dir) = self.asset_dir {
            if let (Some(id), Some(image_url)) = (record.patient_id.clone(), record.image_url.clone())
            {
                match self.save_asset(&id, &image_url, dir).await {
                    Ok(path) => tracing::debug!("Saved image {}", path.display()),
                    Err(e) => {
                        tracing::debug!("Image for {} not persisted: {}", stub.url, e);
                    }
                }
            }
        }

        record
    }

    async fn enrich_from_detail(&self, record: &mut Record) -> Result<(), ItemError> {
        let response = self.fetcher.fetch(&record.url).await?.ensure_success()?;
        let body = response.text();

        // Parse and mine synchronously; the document must not live across
        // an await point.
        let document = Html::parse_document(&body);
        let schema = match self.scope {
            Scope::Articles => ARTICLE_DETAIL_SCHEMA,
            Scope::Cases => CASE_DETAIL_SCHEMA,
        };
        extractor::apply_schema(&document, schema, record);

        Ok(())
    }

    /// Fetches the image and writes it as `<identifier>.jpg` under `dir`
    async fn save_asset(
        &self,
        identifier: &str,
        image_url: &str,
        dir: &Path,
    ) -> Result<PathBuf, AssetError> {
        let response = self.fetcher.fetch(image_url).await?.ensure_success()?;
        let path = dir.join(format!("{}.jpg", identifier));
        std::fs::write(&path, &response.body)?;
        Ok(path)
    }
}
