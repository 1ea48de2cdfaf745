//! Institution domain model
//!
//! An institution is a public body that issues regulations (ministry,
//! authority, board). Records are produced by the adapters in
//! [`crate::core::adapt`] and carry no identity beyond their fields.

use super::ids::{encode_path_segment, InstitutionSlug};
use serde::{Deserialize, Serialize};

/// A regulation-issuing institution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Institution {
    /// API identifier
    pub id: String,

    /// URL slug used by the public site
    pub slug: InstitutionSlug,

    /// Display name
    pub name: String,

    /// Short description (optional)
    pub description: Option<String>,

    /// Number of regulations the API knows for this institution
    pub regulation_count: u64,

    /// Logo image URL (optional)
    pub logo_url: Option<String>,

    /// Official website (optional)
    pub website: Option<String>,
}

impl Institution {
    /// Path of this institution's page on the public site
    pub fn page_path(&self) -> String {
        format!("/institutions/{}", encode_path_segment(self.slug.as_str()))
    }
}

/// Minimal institution reference embedded in regulation records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstitutionRef {
    /// API identifier, when the API provides one
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// Slug, when one can be determined
    pub slug: Option<InstitutionSlug>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path() {
        let institution = Institution {
            id: "12".to_string(),
            slug: InstitutionSlug::new("central-bank").unwrap(),
            name: "Central Bank".to_string(),
            description: None,
            regulation_count: 0,
            logo_url: None,
            website: None,
        };
        assert_eq!(institution.page_path(), "/institutions/central-bank");
    }
}
