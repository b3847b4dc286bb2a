//! Schema-driven field extraction from parsed documents
//!
//! Each extracted field is declared as a [`FieldSpec`]: a target field, a
//! CSS selector, and a [`Rule`] saying how matched elements become text.
//! Extraction is best-effort everywhere: a field whose selector matches
//! nothing is omitted from the record, never an error. The whole step is a
//! pure function of document + schema.
//!
//! Two rules encode conventions of the source markup rather than structure:
//! the case discussion heading is embedded inline in its body text, and the
//! article author line ends with `" on <date>"`. Both are handled by
//! [`Rule::TailAfter`], which keeps only the text after the last occurrence
//! of a literal marker.

use crate::records::Record;
use scraper::{ElementRef, Html, Selector};

/// A record field an extraction rule can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Date,
    Description,
    Presentation,
    PatientData,
    CaseDiscussion,
    ImageFindings,
}

/// How matched elements are turned into one field value
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Trimmed text of the first matching element
    First,

    /// Trimmed texts of all matching elements, in document order, joined
    /// with the separator
    Joined(&'static str),

    /// Trimmed text of the first matching element, keeping only what
    /// follows the last occurrence of the literal marker. If the marker is
    /// absent the whole trimmed text is kept, so unseen markup variants
    /// degrade to "whole text" rather than to a missing field.
    TailAfter(&'static str),
}

/// One entry of a field schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub selector: &'static str,
    pub rule: Rule,
}

/// Fields extracted from an article detail page
pub const ARTICLE_DETAIL_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Title,
        selector: "h1.header-title",
        rule: Rule::First,
    },
    FieldSpec {
        field: Field::Date,
        selector: "div.author-info",
        rule: Rule::TailAfter(" on "),
    },
    FieldSpec {
        field: Field::Description,
        selector: "div.body.user-generated-content p",
        rule: Rule::Joined("\n"),
    },
];

/// Fields extracted from a case detail page
pub const CASE_DETAIL_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Presentation,
        selector: "div#case-patient-presentation p",
        rule: Rule::First,
    },
    FieldSpec {
        field: Field::PatientData,
        selector: "div.case-section div.data-item",
        rule: Rule::Joined(" "),
    },
    FieldSpec {
        field: Field::CaseDiscussion,
        selector: "div.body.sub-section",
        rule: Rule::TailAfter("Case Discussion"),
    },
    FieldSpec {
        field: Field::ImageFindings,
        selector: "div.study-findings p",
        rule: Rule::Joined(" "),
    },
];

/// Extracts every schema field present in the document
///
/// Pure function of document + schema: fields whose selectors match nothing
/// are simply absent from the result.
pub fn extract(document: &Html, schema: &[FieldSpec]) -> Vec<(Field, String)> {
    let mut fields = Vec::new();

    for spec in schema {
        let Ok(selector) = Selector::parse(spec.selector) else {
            tracing::debug!("Unparseable selector in schema: {}", spec.selector);
            continue;
        };

        let value = match spec.rule {
            Rule::First => document
                .select(&selector)
                .next()
                .map(|element| element_text(element)),
            Rule::Joined(separator) => {
                let parts: Vec<String> =
                    document.select(&selector).map(element_text).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(separator))
                }
            }
            Rule::TailAfter(marker) => document
                .select(&selector)
                .next()
                .map(|element| tail_after(&element_text(element), marker)),
        };

        if let Some(value) = value {
            fields.push((spec.field, value));
        }
    }

    fields
}

/// Extracts schema fields from a document into a record
pub fn apply_schema(document: &Html, schema: &[FieldSpec], record: &mut Record) {
    for (field, value) in extract(document, schema) {
        let slot = match field {
            Field::Title => &mut record.title,
            Field::Date => &mut record.date,
            Field::Description => &mut record.description,
            Field::Presentation => &mut record.presentation,
            Field::PatientData => &mut record.patient_data,
            Field::CaseDiscussion => &mut record.case_discussion,
            Field::ImageFindings => &mut record.image_findings,
        };
        *slot = Some(value);
    }
}

/// Trimmed text of the first element matching `selector` within a scope
///
/// Used against individual listing entries, whose title and thumbnail only
/// exist in the listing markup.
pub fn first_text(scope: ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    scope
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// An attribute of the first element matching `selector` within a scope
pub fn first_attr(scope: ElementRef<'_>, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    scope
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text after the last occurrence of `marker`, trimmed
fn tail_after(text: &str, marker: &str) -> String {
    match text.rsplit_once(marker) {
        Some((_, tail)) => tail.trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(fields: &[(Field, String)], field: Field) -> Option<&str> {
        fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_article_schema_full_page() {
        let html = r#"<html><body>
            <h1 class="header-title">  Pneumothorax  </h1>
            <div class="author-info">Last revised by Dr X on 2021-01-01</div>
            <div class="body user-generated-content">
                <p>First paragraph.</p>
                <p>Second paragraph.</p>
            </div>
        </body></html>"#;
        let document = Html::parse_document(html);
        let fields = extract(&document, ARTICLE_DETAIL_SCHEMA);

        assert_eq!(value_of(&fields, Field::Title), Some("Pneumothorax"));
        assert_eq!(value_of(&fields, Field::Date), Some("2021-01-01"));
        assert_eq!(
            value_of(&fields, Field::Description),
            Some("First paragraph.\nSecond paragraph.")
        );
    }

    #[test]
    fn test_missing_elements_are_omitted() {
        let document = Html::parse_document("<html><body><p>nothing useful</p></body></html>");
        let fields = extract(&document, ARTICLE_DETAIL_SCHEMA);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_case_discussion_split_marker() {
        let html = r#"<div class="body sub-section">Intro text Case Discussion Actual discussion.</div>"#;
        let document = Html::parse_document(html);
        let fields = extract(&document, CASE_DETAIL_SCHEMA);
        assert_eq!(
            value_of(&fields, Field::CaseDiscussion),
            Some("Actual discussion.")
        );
    }

    #[test]
    fn test_discussion_without_marker_keeps_whole_text() {
        let html = r#"<div class="body sub-section">Only body text here.</div>"#;
        let document = Html::parse_document(html);
        let fields = extract(&document, CASE_DETAIL_SCHEMA);
        assert_eq!(
            value_of(&fields, Field::CaseDiscussion),
            Some("Only body text here.")
        );
    }

    #[test]
    fn test_date_split_takes_last_marker() {
        // " on " can appear in the author name line itself; only the final
        // occurrence separates the date.
        let html = r#"<div class="author-info">Posted by Dr on-call on 2021-01-01</div>"#;
        let document = Html::parse_document(html);
        let fields = extract(&document, ARTICLE_DETAIL_SCHEMA);
        assert_eq!(value_of(&fields, Field::Date), Some("2021-01-01"));
    }

    #[test]
    fn test_joined_fields_in_document_order() {
        let html = r#"<html><body>
            <div class="case-section"><div class="data-item">Age: 40</div></div>
            <div class="case-section"><div class="data-item">Gender: F</div></div>
            <div class="study-findings"><p>Finding one.</p><p>Finding two.</p></div>
        </body></html>"#;
        let document = Html::parse_document(html);
        let fields = extract(&document, CASE_DETAIL_SCHEMA);
        assert_eq!(
            value_of(&fields, Field::PatientData),
            Some("Age: 40 Gender: F")
        );
        assert_eq!(
            value_of(&fields, Field::ImageFindings),
            Some("Finding one. Finding two.")
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<html><body>
            <h1 class="header-title">Title</h1>
            <div class="author-info">X on 2020-05-05</div>
        </body></html>"#;
        let document = Html::parse_document(html);
        let first = extract(&document, ARTICLE_DETAIL_SCHEMA);
        let second = extract(&document, ARTICLE_DETAIL_SCHEMA);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scoped_stub_helpers() {
        let html = r#"<a class="search-result search-result-case" href="/cases/x">
            <h4 class="search-result-title-text"> A case title </h4>
            <img class="media-object centered-image" src="https://img.example.com/t.jpg">
        </a>"#;
        let document = Html::parse_document(html);
        let anchor_selector = Selector::parse("a.search-result").unwrap();
        let anchor = document.select(&anchor_selector).next().unwrap();

        assert_eq!(
            first_text(anchor, "h4.search-result-title-text").as_deref(),
            Some("A case title")
        );
        assert_eq!(
            first_attr(anchor, "img.media-object.centered-image", "src").as_deref(),
            Some("https://img.example.com/t.jpg")
        );
        assert_eq!(first_attr(anchor, "img.missing", "src"), None);
    }
}
