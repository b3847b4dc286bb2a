//! Closed filter vocabularies for the search index
//!
//! The origin only understands a fixed set of article sections and body
//! systems; anything else returns an empty result page. Filter names are
//! validated against these sets before a crawl starts, using the exact
//! display spellings the origin expects in its query parameters.

use crate::QueryError;

/// Article section filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Anatomy,
    Approach,
    ArtificialIntelligence,
    Classifications,
    Gamuts,
    ImagingTechnology,
    InterventionalRadiology,
    Mnemonics,
    Pathology,
    Radiography,
    Signs,
    Staging,
    Syndromes,
}

impl Section {
    /// The display spelling used in the origin's `section` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anatomy => "Anatomy",
            Self::Approach => "Approach",
            Self::ArtificialIntelligence => "Artificial Intelligence",
            Self::Classifications => "Classifications",
            Self::Gamuts => "Gamuts",
            Self::ImagingTechnology => "Imaging Technology",
            Self::InterventionalRadiology => "Interventional Radiology",
            Self::Mnemonics => "Mnemonics",
            Self::Pathology => "Pathology",
            Self::Radiography => "Radiography",
            Self::Signs => "Signs",
            Self::Staging => "Staging",
            Self::Syndromes => "Syndromes",
        }
    }

    /// Parses a section from its display spelling (case-sensitive, like the origin)
    pub fn from_name(name: &str) -> Result<Self, QueryError> {
        Self::all()
            .iter()
            .find(|s| s.as_str() == name.trim())
            .copied()
            .ok_or_else(|| QueryError::UnknownFilter {
                kind: "section",
                name: name.to_string(),
            })
    }

    /// All known sections
    pub fn all() -> &'static [Self] {
        &[
            Self::Anatomy,
            Self::Approach,
            Self::ArtificialIntelligence,
            Self::Classifications,
            Self::Gamuts,
            Self::ImagingTechnology,
            Self::InterventionalRadiology,
            Self::Mnemonics,
            Self::Pathology,
            Self::Radiography,
            Self::Signs,
            Self::Staging,
            Self::Syndromes,
        ]
    }
}

/// Body system filter
///
/// `NotApplicable` is a real value in the origin's case index (unclassified
/// cases); it does not exist for articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    Breast,
    Cardiac,
    CentralNervousSystem,
    Chest,
    Forensic,
    Gastrointestinal,
    Gynaecology,
    Haematology,
    HeadAndNeck,
    Hepatobiliary,
    Interventional,
    Musculoskeletal,
    Obstetrics,
    Oncology,
    Paediatrics,
    Spine,
    Trauma,
    Urogenital,
    Vascular,
    NotApplicable,
}

impl System {
    /// The display spelling used in the origin's `system` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breast => "Breast",
            Self::Cardiac => "Cardiac",
            Self::CentralNervousSystem => "Central Nervous System",
            Self::Chest => "Chest",
            Self::Forensic => "Forensic",
            Self::Gastrointestinal => "Gastrointestinal",
            Self::Gynaecology => "Gynaecology",
            Self::Haematology => "Haematology",
            Self::HeadAndNeck => "Head & Neck",
            Self::Hepatobiliary => "Hepatobiliary",
            Self::Interventional => "Interventional",
            Self::Musculoskeletal => "Musculoskeletal",
            Self::Obstetrics => "Obstetrics",
            Self::Oncology => "Oncology",
            Self::Paediatrics => "Paediatrics",
            Self::Spine => "Spine",
            Self::Trauma => "Trauma",
            Self::Urogenital => "Urogenital",
            Self::Vascular => "Vascular",
            Self::NotApplicable => "Not Applicable",
        }
    }

    /// Parses a system from its display spelling (case-sensitive, like the origin)
    pub fn from_name(name: &str) -> Result<Self, QueryError> {
        Self::all()
            .iter()
            .find(|s| s.as_str() == name.trim())
            .copied()
            .ok_or_else(|| QueryError::UnknownFilter {
                kind: "system",
                name: name.to_string(),
            })
    }

    /// All known systems
    pub fn all() -> &'static [Self] {
        &[
            Self::Breast,
            Self::Cardiac,
            Self::CentralNervousSystem,
            Self::Chest,
            Self::Forensic,
            Self::Gastrointestinal,
            Self::Gynaecology,
            Self::Haematology,
            Self::HeadAndNeck,
            Self::Hepatobiliary,
            Self::Interventional,
            Self::Musculoskeletal,
            Self::Obstetrics,
            Self::Oncology,
            Self::Paediatrics,
            Self::Spine,
            Self::Trauma,
            Self::Urogenital,
            Self::Vascular,
            Self::NotApplicable,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_round_trip() {
        for section in Section::all() {
            assert_eq!(Section::from_name(section.as_str()).unwrap(), *section);
        }
    }

    #[test]
    fn test_system_round_trip() {
        for system in System::all() {
            assert_eq!(System::from_name(system.as_str()).unwrap(), *system);
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = Section::from_name("Astrology").unwrap_err();
        assert!(matches!(err, QueryError::UnknownFilter { kind: "section", .. }));
    }

    #[test]
    fn test_section_names_are_case_sensitive() {
        assert!(Section::from_name("anatomy").is_err());
    }

    #[test]
    fn test_multi_word_names() {
        assert_eq!(
            System::from_name("Central Nervous System").unwrap(),
            System::CentralNervousSystem
        );
        assert_eq!(System::from_name("Head & Neck").unwrap(), System::HeadAndNeck);
        assert_eq!(System::from_name("Not Applicable").unwrap(), System::NotApplicable);
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(Section::from_name(" Anatomy ").unwrap(), Section::Anatomy);
    }
}
