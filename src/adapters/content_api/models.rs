//! Content API wire models
//!
//! Raw payload shapes as the content API sends them. The API is not strict
//! about casing or id types, so fields accept both `snake_case` and
//! `camelCase` spellings and ids may be numbers or strings. Nothing outside
//! the adapters should touch these types; [`crate::core::adapt`] turns them
//! into domain records.

use crate::domain::ids::{string_or_number, DocumentId};
use serde::{Deserialize, Deserializer};

/// API paths, relative to a base URL
pub mod paths {
    pub const INSTITUTIONS: &str = "/api/v1/institutions";
    pub const DOCUMENTS: &str = "/api/v1/documents";
    pub const SEARCH: &str = "/api/v1/search";
    pub const AUTOCOMPLETE: &str = "/api/v1/autocomplete";
    pub const SITEMAP: &str = "/api/v1/sitemap";
    pub const HEALTH: &str = "/api/v1/health";
}

/// Header carrying the authoritative total for paginated endpoints
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Standard response wrapper
///
/// `success = false` is a logical failure even when the HTTP status is 2xx.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub success: bool,

    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiInstitution {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, alias = "documentCount")]
    pub document_count: Option<u64>,

    #[serde(default, alias = "logoUrl")]
    pub logo_url: Option<String>,

    #[serde(default, alias = "websiteUrl")]
    pub website: Option<String>,
}

/// Tags arrive either as one delimited string or as an array
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiTags {
    Delimited(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDocument {
    pub id: DocumentId,

    #[serde(default)]
    pub title: String,

    #[serde(default, alias = "documentNumber", alias = "number")]
    pub document_number: Option<String>,

    #[serde(default, alias = "institutionId", deserialize_with = "opt_string_or_number")]
    pub institution_id: Option<String>,

    #[serde(default, alias = "institutionName")]
    pub institution_name: Option<String>,

    #[serde(default, alias = "institutionSlug")]
    pub institution_slug: Option<String>,

    #[serde(default, alias = "documentType", alias = "type")]
    pub document_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub tags: Option<ApiTags>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, alias = "publicationDate", alias = "published_at")]
    pub publication_date: Option<String>,

    #[serde(default, alias = "effectiveDate")]
    pub effective_date: Option<String>,

    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,

    #[serde(default, alias = "sourceUrl")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchHit {
    pub id: DocumentId,

    #[serde(default)]
    pub title: String,

    #[serde(default, alias = "highlight", alias = "excerpt")]
    pub snippet: Option<String>,

    #[serde(default, alias = "institutionName")]
    pub institution_name: Option<String>,

    #[serde(default, alias = "documentType", alias = "type")]
    pub document_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, alias = "publicationDate")]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub score: Option<f64>,
}

/// Suggestions are plain strings on older deployments
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiSuggestion {
    Text(String),
    Detailed {
        #[serde(alias = "value")]
        text: String,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSitemapItem {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default, alias = "updatedAt", alias = "lastmod")]
    pub updated_at: Option<String>,
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_count() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"count":40,"message":"ok"}"#)
                .unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2]));
        assert_eq!(env.count, Some(40));
    }

    #[test]
    fn test_envelope_failure_without_data() {
        let env: Envelope =
            serde_json::from_str(r#"{"success":false,"message":"Index offline"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Index offline"));
    }

    #[test]
    fn test_document_accepts_camel_case_and_numeric_ids() {
        let doc: ApiDocument = serde_json::from_str(
            r#"{
                "id": 4821,
                "title": "Regulation on Payment Services",
                "institutionId": 7,
                "institutionName": "Central Bank",
                "documentType": "regulation",
                "status": "Yürürlükte",
                "tags": "payments, fintech",
                "publicationDate": "2024-03-01"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id.as_str(), "4821");
        assert_eq!(doc.institution_id.as_deref(), Some("7"));
        assert_eq!(doc.document_type.as_deref(), Some("regulation"));
        assert_eq!(
            doc.tags,
            Some(ApiTags::Delimited("payments, fintech".to_string()))
        );
    }

    #[test]
    fn test_document_tags_as_list() {
        let doc: ApiDocument =
            serde_json::from_str(r#"{"id":"a1","title":"T","tags":["x","y"]}"#).unwrap();
        assert_eq!(
            doc.tags,
            Some(ApiTags::List(vec!["x".to_string(), "y".to_string()]))
        );
        assert!(doc.institution_id.is_none());
    }

    #[test]
    fn test_suggestion_shapes() {
        let raw: Vec<ApiSuggestion> =
            serde_json::from_str(r#"["banking", {"text":"Banking Law","type":"title"}]"#).unwrap();
        assert_eq!(raw[0], ApiSuggestion::Text("banking".to_string()));
        assert_eq!(
            raw[1],
            ApiSuggestion::Detailed {
                text: "Banking Law".to_string(),
                kind: Some("title".to_string())
            }
        );
    }

    #[test]
    fn test_sitemap_item() {
        let item: ApiSitemapItem =
            serde_json::from_str(r#"{"id":12,"updatedAt":"2024-05-02T10:00:00Z"}"#).unwrap();
        assert_eq!(item.id.as_deref(), Some("12"));
        assert!(item.slug.is_none());
    }
}
