//! Search query construction and listing URL building
//!
//! A [`SearchQuery`] is the sole input to a crawl run: scope (articles or
//! cases), an optional filter dimension drawn from a closed vocabulary, an
//! optional recency sort, and a bounded page count. Queries are validated on
//! construction and immutable afterwards.

mod filters;

pub use filters::{Section, System};

use crate::QueryError;
use url::Url;

/// Maximum number of listing pages one run may request
pub const MAX_PAGES: u32 = 5;

/// What kind of entity the search index is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Articles,
    Cases,
}

impl Scope {
    /// The value of the origin's `scope` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Cases => "cases",
        }
    }
}

/// Recency sort modes understood by the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Most recently edited first (articles)
    DateOfLastEdit,
    /// Most recently published first (cases)
    DateOfPublication,
}

impl SortMode {
    /// The value of the origin's `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateOfLastEdit => "date_of_last_edit",
            Self::DateOfPublication => "date_of_publication",
        }
    }
}

/// The single optional filter dimension of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Section(Section),
    System(System),
}

/// A validated, immutable search query
///
/// Construction enforces the origin's rules: page count within bounds,
/// section filters only on articles, `Not Applicable` only on cases, and
/// filter and recency sort mutually exclusive (the origin's filtered
/// listings have a fixed relevance order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    scope: Scope,
    filter: Option<Filter>,
    sort: Option<SortMode>,
    pages: u32,
}

impl SearchQuery {
    /// Creates an unfiltered, unsorted query over `pages` listing pages
    pub fn new(scope: Scope, pages: u32) -> Result<Self, QueryError> {
        if pages == 0 || pages > MAX_PAGES {
            return Err(QueryError::PageCount(pages));
        }
        Ok(Self {
            scope,
            filter: None,
            sort: None,
            pages,
        })
    }

    /// Creates a recency query using the scope's natural sort order
    pub fn recent(scope: Scope, pages: u32) -> Result<Self, QueryError> {
        let sort = match scope {
            Scope::Articles => SortMode::DateOfLastEdit,
            Scope::Cases => SortMode::DateOfPublication,
        };
        let mut query = Self::new(scope, pages)?;
        query.sort = Some(sort);
        Ok(query)
    }

    /// Adds an article-section filter (articles scope only)
    pub fn with_section(mut self, section: Section) -> Result<Self, QueryError> {
        if self.scope != Scope::Articles {
            return Err(QueryError::SectionRequiresArticles);
        }
        if self.sort.is_some() {
            return Err(QueryError::FilterWithSort);
        }
        if self.filter.is_some() {
            return Err(QueryError::FilterConflict);
        }
        self.filter = Some(Filter::Section(section));
        Ok(self)
    }

    /// Adds a body-system filter
    pub fn with_system(mut self, system: System) -> Result<Self, QueryError> {
        if system == System::NotApplicable && self.scope != Scope::Cases {
            return Err(QueryError::SystemRequiresCases);
        }
        if self.sort.is_some() {
            return Err(QueryError::FilterWithSort);
        }
        if self.filter.is_some() {
            return Err(QueryError::FilterConflict);
        }
        self.filter = Some(Filter::System(system));
        Ok(self)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn filter(&self) -> Option<Filter> {
        self.filter
    }

    pub fn sort(&self) -> Option<SortMode> {
        self.sort
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Builds the listing URL for one page of this query
    pub fn listing_url(&self, base: &Url, page: u32) -> Result<Url, url::ParseError> {
        let mut url = base.join("/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("scope", self.scope.as_str());
            match self.filter {
                Some(Filter::Section(section)) => {
                    pairs.append_pair("section", section.as_str());
                }
                Some(Filter::System(system)) => {
                    pairs.append_pair("system", system.as_str());
                }
                None => {}
            }
            if let Some(sort) = self.sort {
                pairs.append_pair("sort", sort.as_str());
            }
            pairs.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// A filesystem-safe label describing this query
    ///
    /// Used to name run-scoped output such as the image directory.
    /// Non-alphanumeric characters in filter names become underscores.
    pub fn label(&self) -> String {
        let raw = match (self.filter, self.sort) {
            (Some(Filter::Section(section)), _) => {
                format!("{}_section_{}", self.scope.as_str(), section.as_str())
            }
            (Some(Filter::System(system)), _) => {
                format!("{}_system_{}", self.scope.as_str(), system.as_str())
            }
            (None, Some(_)) => format!("recent_{}", self.scope.as_str()),
            (None, None) => self.scope.as_str().to_string(),
        };
        raw.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

/// Resolves a listing-entry href against the base origin
///
/// Hrefs on listing pages are root-relative (`/articles/...`, `/cases/...`).
/// Anything that does not resolve to an HTTP(S) URL is discarded.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
