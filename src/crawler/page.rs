//! Per-page crawling: listing fetch, stub enumeration, item drive
//!
//! A listing page that cannot be fetched is fatal upward, since with no
//! entries to enumerate there is no meaningful partial result. Failures of
//! the individual items on a fetched page stay local to those items.

use crate::crawler::extractor::{first_attr, first_text};
use crate::crawler::fetcher::{FetchError, RateLimitedFetcher};
use crate::crawler::item::ItemCrawler;
use crate::crawler::pacing::Pacer;
use crate::query::{resolve_href, Scope, SearchQuery};
use crate::records::{ListingPage, Record, ResultStub};
use scraper::{Html, Selector};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Failure to produce a listing page; propagates to the run
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid listing URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The anchor selector matching one scope's result entries
pub fn result_selector(scope: Scope) -> &'static str {
    match scope {
        Scope::Articles => "a.search-result.search-result-article",
        Scope::Cases => "a.search-result.search-result-case",
    }
}

/// Crawls one listing page of a query into its records
pub struct PageCrawler<'a> {
    fetcher: &'a RateLimitedFetcher,
    pacer: &'a Pacer,
    query: &'a SearchQuery,
    base: &'a Url,
    asset_dir: Option<&'a Path>,
}

impl<'a> PageCrawler<'a> {
    pub fn new(
        fetcher: &'a RateLimitedFetcher,
        pacer: &'a Pacer,
        query: &'a SearchQuery,
        base: &'a Url,
        asset_dir: Option<&'a Path>,
    ) -> Self {
        Self {
            fetcher,
            pacer,
            query,
            base,
            asset_dir,
        }
    }

    /// Fetches one listing page and crawls every result entry on it
    ///
    /// Returns the page's records in document order. Item failures degrade
    /// individual records (see the item module); only a failure to fetch
    /// the listing itself is an error. Applies the short pacing delay after
    /// each item and the longer page delay before returning.
    pub async fn crawl_page(&self, page: u32) -> Result<Vec<Record>, PageError> {
        let url = self.query.listing_url(self.base, page)?;
        tracing::info!("Fetching listing page {}: {}", page, url);

        let response = self.fetcher.fetch(url.as_str()).await?.ensure_success()?;
        let listing = enumerate_stubs(&response.text(), self.query.scope(), self.base, page, url);
        tracing::info!("Page {}: {} result entries", page, listing.stubs.len());

        let item_crawler = ItemCrawler::new(self.fetcher, self.query.scope(), self.asset_dir);
        let mut records = Vec::with_capacity(listing.stubs.len());

        for stub in &listing.stubs {
            records.push(item_crawler.crawl(stub).await);
            self.pacer.after_item().await;
        }

        self.pacer.after_page().await;
        Ok(records)
    }
}

/// Enumerates result stubs from listing markup, in document order
///
/// Entries without a resolvable href are skipped. The title and thumbnail
/// visible on the result card are captured here because they do not exist
/// on the detail page.
pub fn enumerate_stubs(html: &str, scope: Scope, base: &Url, index: u32, url: Url) -> ListingPage {
    let document = Html::parse_document(html);
    let mut stubs = Vec::new();

    if let Ok(selector) = Selector::parse(result_selector(scope)) {
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                tracing::warn!("Result entry without href on page {}", index);
                continue;
            };
            let Some(detail_url) = resolve_href(base, href) else {
                tracing::warn!("Unresolvable result href on page {}: {}", index, href);
                continue;
            };

            stubs.push(ResultStub {
                url: detail_url,
                title: first_text(anchor, "h4.search-result-title-text"),
                image_url: first_attr(anchor, "img.media-object.centered-image", "src"),
            });
        }
    }

    ListingPage { index, url, stubs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://radiopaedia.org").unwrap()
    }

    fn listing_url() -> Url {
        Url::parse("https://radiopaedia.org/search?scope=cases&page=1").unwrap()
    }

    #[test]
    fn test_enumerate_case_stubs() {
        let html = r#"<html><body>
            <a class="search-result search-result-case" href="/cases/first-case">
                <h4 class="search-result-title-text">First case</h4>
                <img class="media-object centered-image" src="https://img.example.com/1.jpg">
            </a>
            <a class="search-result search-result-case" href="/cases/second-case">
                <h4 class="search-result-title-text">Second case</h4>
            </a>
        </body></html>"#;

        let listing = enumerate_stubs(html, Scope::Cases, &base(), 1, listing_url());

        assert_eq!(listing.stubs.len(), 2);
        assert_eq!(
            listing.stubs[0].url.as_str(),
            "https://radiopaedia.org/cases/first-case"
        );
        assert_eq!(listing.stubs[0].title.as_deref(), Some("First case"));
        assert_eq!(
            listing.stubs[0].image_url.as_deref(),
            Some("https://img.example.com/1.jpg")
        );
        assert_eq!(listing.stubs[1].title.as_deref(), Some("Second case"));
        assert_eq!(listing.stubs[1].image_url, None);
    }

    #[test]
    fn test_scope_selectors_do_not_cross_match() {
        let html = r#"<html><body>
            <a class="search-result search-result-article" href="/articles/a">Article</a>
            <a class="search-result search-result-case" href="/cases/c">Case</a>
        </body></html>"#;

        let articles = enumerate_stubs(html, Scope::Articles, &base(), 1, listing_url());
        assert_eq!(articles.stubs.len(), 1);
        assert_eq!(
            articles.stubs[0].url.as_str(),
            "https://radiopaedia.org/articles/a"
        );

        let cases = enumerate_stubs(html, Scope::Cases, &base(), 1, listing_url());
        assert_eq!(cases.stubs.len(), 1);
        assert_eq!(cases.stubs[0].url.as_str(), "https://radiopaedia.org/cases/c");
    }

    #[test]
    fn test_entries_without_href_are_skipped() {
        let html = r#"<html><body>
            <a class="search-result search-result-case">No href</a>
            <a class="search-result search-result-case" href="/cases/ok">Ok</a>
        </body></html>"#;

        let listing = enumerate_stubs(html, Scope::Cases, &base(), 1, listing_url());
        assert_eq!(listing.stubs.len(), 1);
        assert_eq!(listing.stubs[0].url.as_str(), "https://radiopaedia.org/cases/ok");
    }

    #[test]
    fn test_empty_listing_yields_no_stubs() {
        let listing = enumerate_stubs(
            "<html><body><p>No results.</p></body></html>",
            Scope::Cases,
            &base(),
            3,
            listing_url(),
        );
        assert_eq!(listing.index, 3);
        assert!(listing.stubs.is_empty());
    }
}
