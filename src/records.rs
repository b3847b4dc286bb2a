//! Data model for extracted entities
//!
//! Records are sparse by design: the source markup frequently omits
//! elements, and a field that could not be extracted is simply absent from
//! the serialized output rather than null-filled. Only `url` is guaranteed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// The fully extracted entity for one search result
///
/// Articles populate `title`, `date`, and `description`; cases populate
/// `patient_id`, `title`, `presentation`, `patient_data`, `case_discussion`,
/// `image_findings`, and `image_url`. Unused fields stay `None` and are
/// omitted from serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Synthetic case identifier, generated fresh per item before any
    /// network activity (never derived from source content)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    /// Detail page URL
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication/last-edit date text (articles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Article body paragraphs, newline-joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Patient presentation text (cases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation: Option<String>,

    /// Space-joined patient data fragments (cases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_data: Option<String>,

    /// Case discussion body, after the inline heading (cases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_discussion: Option<String>,

    /// Space-joined imaging findings (cases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_findings: Option<String>,

    /// Source URL of the case thumbnail, recorded whether or not the bytes
    /// were persisted locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Record {
    /// A record carrying only its detail URL
    pub fn with_url(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

/// The minimal reference to one item found on a listing page
///
/// Some fields only exist in the listing markup (the case title and
/// thumbnail live on the search result card, not the detail page), so they
/// are captured opportunistically here before the detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultStub {
    /// Absolute detail-page URL, resolved from the entry's href
    pub url: Url,

    /// Title text visible on the listing entry, if any
    pub title: Option<String>,

    /// Thumbnail image URL visible on the listing entry, if any
    pub image_url: Option<String>,
}

/// One fetched and parsed page of paginated search results
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// 1-based page index within the run
    pub index: u32,

    /// The listing URL this page was fetched from
    pub url: Url,

    /// Result entries in document order
    pub stubs: Vec<ResultStub>,
}

/// The keyed-by-page output of one crawl run
///
/// Exactly one entry per successfully fetched page, keyed `page_<n>` in
/// ascending page order. A page that yielded no results is present with an
/// empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunResult(IndexMap<String, Vec<Record>>);

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map key for a page index
    pub fn page_key(page: u32) -> String {
        format!("page_{}", page)
    }

    /// Appends one page's records; pages must be inserted in ascending order
    pub fn insert_page(&mut self, page: u32, records: Vec<Record>) {
        self.0.insert(Self::page_key(page), records);
    }

    /// The records for one page, if that page was crawled
    pub fn page(&self, page: u32) -> Option<&[Record]> {
        self.0.get(&Self::page_key(page)).map(Vec::as_slice)
    }

    /// Number of page entries
    pub fn page_count(&self) -> usize {
        self.0.len()
    }

    /// Page keys in insertion (ascending page) order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total records across all pages
    pub fn total_records(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// True when every crawled page yielded zero records
    ///
    /// Callers map this to a "not found" outcome; it is not an error.
    pub fn is_empty_of_records(&self) -> bool {
        self.total_records() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Whether image persistence was requested for a run, and where
///
/// Set once at run start and never touched by individual save failures;
/// "reference recorded" and "bytes persisted" are deliberately decoupled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSaveOutcome {
    pub saved: bool,

    /// Absolute path of the run-scoped image directory, when saving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_in_ascending_order() {
        let mut result = RunResult::new();
        for page in 1..=4 {
            result.insert_page(page, vec![]);
        }
        let keys: Vec<&str> = result.keys().collect();
        assert_eq!(keys, vec!["page_1", "page_2", "page_3", "page_4"]);
    }

    #[test]
    fn test_empty_page_still_present() {
        let mut result = RunResult::new();
        result.insert_page(1, vec![]);
        assert_eq!(result.page_count(), 1);
        assert_eq!(result.page(1).unwrap().len(), 0);
        assert!(result.is_empty_of_records());
    }

    #[test]
    fn test_total_records() {
        let mut result = RunResult::new();
        let record = Record {
            url: "https://radiopaedia.org/articles/x".to_string(),
            ..Record::default()
        };
        result.insert_page(1, vec![record.clone(), record.clone()]);
        result.insert_page(2, vec![record]);
        assert_eq!(result.total_records(), 3);
        assert!(!result.is_empty_of_records());
    }

    #[test]
    fn test_absent_fields_omitted_from_json() {
        let record = Record {
            url: "https://radiopaedia.org/cases/y".to_string(),
            title: Some("A case".to_string()),
            ..Record::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("url"));
        assert!(object.contains_key("title"));
        assert!(!object.contains_key("patient_id"));
        assert!(!object.contains_key("case_discussion"));
    }

    #[test]
    fn test_run_result_serializes_as_plain_map() {
        let mut result = RunResult::new();
        result.insert_page(1, vec![]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"page_1":[]}"#);
    }
}
