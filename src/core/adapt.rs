//! Raw API record → domain record adapters
//!
//! Pure functions with no I/O. They rename fields, split tag strings,
//! classify status text, parse dates, and normalize blank strings to `None`.
//! Adapting the same payload twice always yields equal values.

use crate::adapters::content_api::models::{
    ApiDocument, ApiInstitution, ApiSearchHit, ApiSitemapItem, ApiSuggestion, ApiTags,
};
use crate::domain::{
    FeedKind, Institution, InstitutionRef, InstitutionSlug, Regulation, RegulationStatus,
    SearchResult, SitemapEntry, Suggestion,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// Adapt one institution
///
/// The slug falls back to one derived from the name when the API sends none.
///
/// # Errors
///
/// Returns an error if no usable slug can be determined.
pub fn institution(raw: ApiInstitution) -> Result<Institution, String> {
    let name = raw.name.trim().to_string();
    let slug = match non_blank(raw.slug) {
        Some(slug) => InstitutionSlug::new(slug)?,
        None => InstitutionSlug::from_name(&name)
            .map_err(|e| format!("institution {} has no slug or name: {e}", raw.id))?,
    };

    Ok(Institution {
        id: raw.id,
        slug,
        name,
        description: non_blank(raw.description),
        regulation_count: raw.document_count.unwrap_or(0),
        logo_url: non_blank(raw.logo_url),
        website: non_blank(raw.website),
    })
}

/// Adapt a list of institutions, skipping unusable records
///
/// The result is sorted by name so listings are stable across hosts.
pub fn institutions(raw: Vec<ApiInstitution>) -> Vec<Institution> {
    let mut adapted: Vec<Institution> = raw
        .into_iter()
        .filter_map(|r| match institution(r) {
            Ok(i) => Some(i),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid institution record");
                None
            }
        })
        .collect();
    adapted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    adapted
}

/// Adapt one regulation document
pub fn regulation(raw: ApiDocument) -> Regulation {
    let institution = institution_ref(raw.institution_id, raw.institution_name, raw.institution_slug);

    Regulation {
        id: raw.id,
        title: raw.title.trim().to_string(),
        number: non_blank(raw.document_number),
        institution,
        kind: non_blank(raw.document_type),
        status: RegulationStatus::classify(raw.status.as_deref().unwrap_or_default()),
        tags: raw.tags.map(tags).unwrap_or_default(),
        summary: non_blank(raw.summary),
        content: non_blank(raw.content),
        published_on: raw.publication_date.as_deref().and_then(parse_date),
        effective_on: raw.effective_date.as_deref().and_then(parse_date),
        updated_at: raw.updated_at.as_deref().and_then(parse_timestamp),
        source_url: non_blank(raw.source_url),
    }
}

/// Adapt one search hit
pub fn search_result(raw: ApiSearchHit) -> SearchResult {
    SearchResult {
        id: raw.id,
        title: raw.title.trim().to_string(),
        snippet: non_blank(raw.snippet),
        institution_name: non_blank(raw.institution_name),
        kind: non_blank(raw.document_type),
        status: RegulationStatus::classify(raw.status.as_deref().unwrap_or_default()),
        published_on: raw.publication_date.as_deref().and_then(parse_date),
        score: raw.score,
    }
}

/// Adapt autocomplete suggestions
///
/// Blank entries are dropped and duplicates (ignoring case) removed, keeping
/// the first occurrence.
pub fn suggestions(raw: Vec<ApiSuggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|s| {
            let (text, kind) = match s {
                ApiSuggestion::Text(text) => (text, None),
                ApiSuggestion::Detailed { text, kind } => (text, non_blank(kind)),
            };
            let text = text.trim().to_string();
            if text.is_empty() || !seen.insert(text.to_lowercase()) {
                return None;
            }
            Some(Suggestion { text, kind })
        })
        .collect()
}

/// Adapt one sitemap feed
///
/// Institutions are keyed by slug and documents by id. Items without the
/// needed key are dropped.
pub fn sitemap_entries(feed: FeedKind, raw: Vec<ApiSitemapItem>) -> Vec<SitemapEntry> {
    raw.into_iter()
        .filter_map(|item| {
            let key = match feed {
                FeedKind::Institutions => non_blank(item.slug).or(non_blank(item.id)),
                FeedKind::Documents => non_blank(item.id),
            }?;
            Some(SitemapEntry {
                feed,
                key,
                last_modified: item.updated_at.as_deref().and_then(parse_date),
            })
        })
        .collect()
}

/// Split a tag field into trimmed, unique, non-empty tags
///
/// # Examples
///
/// ```
/// use regulus::core::adapt::split_tags;
///
/// assert_eq!(split_tags("banking, payments;Banking, "), vec!["banking", "payments"]);
/// ```
pub fn split_tags(raw: &str) -> Vec<String> {
    dedup_tags(raw.split([',', ';']).map(str::to_string))
}

fn tags(raw: ApiTags) -> Vec<String> {
    match raw {
        ApiTags::Delimited(s) => split_tags(&s),
        ApiTags::List(list) => dedup_tags(list.into_iter()),
    }
}

fn dedup_tags(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

fn institution_ref(
    id: Option<String>,
    name: Option<String>,
    slug: Option<String>,
) -> Option<InstitutionRef> {
    let name = non_blank(name)?;
    let slug = non_blank(slug)
        .and_then(|s| InstitutionSlug::new(s).ok())
        .or_else(|| InstitutionSlug::from_name(&name).ok());
    Some(InstitutionRef {
        id: non_blank(id),
        name,
        slug,
    })
}

/// Parse `YYYY-MM-DD`, `DD.MM.YYYY`, or an RFC 3339 timestamp into a date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
}

/// Parse an RFC 3339 timestamp, or a bare date as midnight UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentId;

    fn raw_document() -> ApiDocument {
        serde_json::from_value(serde_json::json!({
            "id": 4821,
            "title": "  Regulation on Payment Services  ",
            "documentNumber": "2024/113",
            "institutionId": 7,
            "institutionName": "Central Bank",
            "documentType": "regulation",
            "status": "Amended",
            "tags": "payments; e-money, Payments,",
            "summary": " ",
            "content": "# Article 1\n\nScope.",
            "publicationDate": "2024-03-01",
            "effectiveDate": "01.06.2024",
            "updatedAt": "2024-05-02T10:30:00+03:00",
            "sourceUrl": "https://gazette.example/2024/113"
        }))
        .unwrap()
    }

    #[test]
    fn test_regulation_adapter() {
        let regulation = regulation(raw_document());

        assert_eq!(regulation.id, DocumentId::new("4821").unwrap());
        assert_eq!(regulation.title, "Regulation on Payment Services");
        assert_eq!(regulation.number.as_deref(), Some("2024/113"));
        assert_eq!(regulation.kind.as_deref(), Some("regulation"));
        assert_eq!(regulation.status, RegulationStatus::Amended);
        assert_eq!(regulation.tags, vec!["payments", "e-money"]);
        assert_eq!(regulation.summary, None);
        assert_eq!(
            regulation.published_on,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            regulation.effective_on,
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(
            regulation.updated_at.map(|ts| ts.to_rfc3339()),
            Some("2024-05-02T07:30:00+00:00".to_string())
        );

        let institution = regulation.institution.unwrap();
        assert_eq!(institution.id.as_deref(), Some("7"));
        assert_eq!(institution.slug.unwrap().as_str(), "central-bank");
    }

    #[test]
    fn test_regulation_adapter_is_deterministic() {
        assert_eq!(regulation(raw_document()), regulation(raw_document()));
    }

    #[test]
    fn test_regulation_without_optional_fields() {
        let raw: ApiDocument = serde_json::from_str(r#"{"id":"x-1","title":"Bare"}"#).unwrap();
        let regulation = regulation(raw);
        assert!(regulation.institution.is_none());
        assert!(regulation.tags.is_empty());
        assert_eq!(regulation.status, RegulationStatus::Unknown(String::new()));
        assert!(regulation.published_on.is_none());
    }

    #[test]
    fn test_institution_adapter_derives_slug() {
        let raw: ApiInstitution = serde_json::from_str(
            r#"{"id":3,"name":"Capital Markets Board","documentCount":412,"description":""}"#,
        )
        .unwrap();
        let institution = institution(raw).unwrap();
        assert_eq!(institution.slug.as_str(), "capital-markets-board");
        assert_eq!(institution.regulation_count, 412);
        assert_eq!(institution.description, None);
    }

    #[test]
    fn test_institutions_skip_invalid_and_sort() {
        let raw: Vec<ApiInstitution> = serde_json::from_str(
            r#"[
                {"id":1,"name":"Treasury","slug":"treasury"},
                {"id":2,"name":"  "},
                {"id":3,"name":"agriculture ministry","slug":"agriculture"}
            ]"#,
        )
        .unwrap();
        let adapted = institutions(raw);
        let names: Vec<_> = adapted.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["agriculture ministry", "Treasury"]);
    }

    #[test]
    fn test_search_result_adapter() {
        let raw: ApiSearchHit = serde_json::from_str(
            r#"{"id":9,"title":"Banking Law","highlight":"<em>bank</em>ing","status":"repealed","score":3.5}"#,
        )
        .unwrap();
        let result = search_result(raw);
        assert_eq!(result.snippet.as_deref(), Some("<em>bank</em>ing"));
        assert_eq!(result.status, RegulationStatus::Repealed);
        assert_eq!(result.score, Some(3.5));
    }

    #[test]
    fn test_suggestions_dedup_and_drop_blank() {
        let raw = vec![
            ApiSuggestion::Text("Banking".to_string()),
            ApiSuggestion::Text(" ".to_string()),
            ApiSuggestion::Detailed {
                text: "banking ".to_string(),
                kind: Some("tag".to_string()),
            },
            ApiSuggestion::Detailed {
                text: "Bank Secrecy".to_string(),
                kind: Some("".to_string()),
            },
        ];
        let adapted = suggestions(raw);
        assert_eq!(adapted.len(), 2);
        assert_eq!(adapted[0].text, "Banking");
        assert_eq!(adapted[1].kind, None);
    }

    #[test]
    fn test_sitemap_entries() {
        let raw: Vec<ApiSitemapItem> = serde_json::from_str(
            r#"[{"slug":"treasury","updatedAt":"2024-01-02T00:00:00Z"},{"id":5},{"updatedAt":"2024-01-01"}]"#,
        )
        .unwrap();
        let entries = sitemap_entries(FeedKind::Institutions, raw.clone());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "treasury");
        assert_eq!(entries[0].last_modified, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(entries[1].key, "5");

        let documents = sitemap_entries(FeedKind::Documents, raw);
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].page_path(), "/regulations/5");
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags(" a ,, b;c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 12, 31);
        assert_eq!(parse_date("2023-12-31"), expected);
        assert_eq!(parse_date("31.12.2023"), expected);
        assert_eq!(parse_date("2023-12-31T22:00:00Z"), expected);
        assert_eq!(parse_date("last week"), None);
        assert_eq!(parse_date(""), None);
    }
}
