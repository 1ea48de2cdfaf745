//! Regulation domain model
//!
//! This module defines the regulation detail record and the status
//! classification applied to the API's free-form status strings.

use super::ids::{encode_path_segment, DocumentId};
use super::institution::InstitutionRef;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Lifecycle status of a regulation
///
/// The API reports status as free text in more than one language. Anything
/// that matches no known keyword is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationStatus {
    /// In force
    Active,
    /// In force with amendments
    Amended,
    /// No longer in force
    Repealed,
    /// Proposed or not yet published
    Draft,
    /// Unrecognized status text
    Unknown(String),
}

impl RegulationStatus {
    /// Classifies a raw status string
    ///
    /// # Examples
    ///
    /// ```
    /// use regulus::domain::RegulationStatus;
    ///
    /// assert_eq!(RegulationStatus::classify("In Force"), RegulationStatus::Active);
    /// assert_eq!(RegulationStatus::classify("mülga"), RegulationStatus::Repealed);
    /// ```
    pub fn classify(raw: &str) -> Self {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if normalized.is_empty() {
            return RegulationStatus::Unknown(String::new());
        }

        status_rules()
            .iter()
            .find(|(pattern, _)| pattern.is_match(&normalized))
            .map(|(_, status)| status.clone())
            .unwrap_or_else(|| RegulationStatus::Unknown(raw.trim().to_string()))
    }

    /// Whether the regulation currently has legal effect
    pub fn is_in_force(&self) -> bool {
        matches!(self, RegulationStatus::Active | RegulationStatus::Amended)
    }
}

impl fmt::Display for RegulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegulationStatus::Active => write!(f, "active"),
            RegulationStatus::Amended => write!(f, "amended"),
            RegulationStatus::Repealed => write!(f, "repealed"),
            RegulationStatus::Draft => write!(f, "draft"),
            RegulationStatus::Unknown(raw) if raw.is_empty() => write!(f, "unknown"),
            RegulationStatus::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Status keywords in match order
///
/// Keywords match at the start of a word, so "repeal" covers "repealed" while
/// "active" does not match inside "inactive". Negated phrases come before the
/// keywords they contain.
const STATUS_KEYWORDS: &[(&[&str], RegulationStatus)] = &[
    (
        &["not yet in force", "not yet effective", "yürürlüğe girmemiş"],
        RegulationStatus::Draft,
    ),
    (
        &[
            "repeal",
            "revoked",
            "abolish",
            "no longer",
            "not in force",
            "inactive",
            "expired",
            "mülga",
            "yürürlükten kalk",
            "yürürlükte değil",
        ],
        RegulationStatus::Repealed,
    ),
    (&["amend", "değişik", "modified"], RegulationStatus::Amended),
    (
        &["draft", "proposed", "taslak", "pending"],
        RegulationStatus::Draft,
    ),
    (
        &["active", "in force", "yürürlükte", "current"],
        RegulationStatus::Active,
    ),
];

fn status_rules() -> &'static [(Regex, RegulationStatus)] {
    static RULES: OnceLock<Vec<(Regex, RegulationStatus)>> = OnceLock::new();
    RULES.get_or_init(|| {
        STATUS_KEYWORDS
            .iter()
            .filter_map(|(keys, status)| {
                let alternatives: Vec<String> = keys.iter().map(|k| regex::escape(k)).collect();
                Regex::new(&format!(r"\b(?:{})", alternatives.join("|")))
                    .ok()
                    .map(|pattern| (pattern, status.clone()))
            })
            .collect()
    })
}

/// A regulation document as shown on its detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Regulation {
    /// Document identifier
    pub id: DocumentId,

    /// Title
    pub title: String,

    /// Official number (e.g. "2024/113"), if any
    pub number: Option<String>,

    /// Issuing institution
    pub institution: Option<InstitutionRef>,

    /// Document type (law, regulation, communiqué, ...)
    pub kind: Option<String>,

    /// Classified status
    pub status: RegulationStatus,

    /// Tags, split and de-duplicated
    pub tags: Vec<String>,

    /// Short summary
    pub summary: Option<String>,

    /// Full text in Markdown
    pub content: Option<String>,

    /// Publication date
    pub published_on: Option<NaiveDate>,

    /// Date the regulation takes effect
    pub effective_on: Option<NaiveDate>,

    /// Last modification time reported by the API
    pub updated_at: Option<DateTime<Utc>>,

    /// Link to the official gazette or source
    pub source_url: Option<String>,
}

impl Regulation {
    /// Path of this regulation's detail page on the public site
    pub fn page_path(&self) -> String {
        format!("/regulations/{}", encode_path_segment(self.id.as_str()))
    }
}
