//! Search, listing, and autocomplete models
//!
//! Query types are built with chained setters and turned into query strings
//! by the content API client. Page types carry the server-side total so the
//! caller can paginate.

use super::ids::DocumentId;
use super::regulation::{Regulation, RegulationStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default page size for search and document listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound accepted by the API for `limit`
pub const MAX_PAGE_SIZE: u32 = 100;

/// Full-text search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Search text
    pub text: String,

    /// 1-based page number
    pub page: u32,

    /// Results per page
    pub limit: u32,

    /// Restrict to one institution (slug or id)
    pub institution: Option<String>,

    /// Restrict to one document type
    pub kind: Option<String>,
}

impl SearchQuery {
    /// Creates a query for the first page with the default page size
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            institution: None,
            kind: None,
        }
    }

    /// Sets the page; values below 1 are clamped to 1
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Restricts results to one institution
    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Restricts results to one document type
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Query-string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.text.trim().to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref institution) = self.institution {
            params.push(("institution", institution.clone()));
        }
        if let Some(ref kind) = self.kind {
            params.push(("type", kind.clone()));
        }
        params
    }
}

/// Filter for the document listing endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFilter {
    pub institution: Option<String>,
    pub kind: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            institution: None,
            kind: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DocumentFilter {
    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref institution) = self.institution {
            params.push(("institution", institution.clone()));
        }
        if let Some(ref kind) = self.kind {
            params.push(("type", kind.clone()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// One search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: DocumentId,
    pub title: String,

    /// Highlighted excerpt, if the API returned one
    pub snippet: Option<String>,

    pub institution_name: Option<String>,
    pub kind: Option<String>,
    pub status: RegulationStatus,
    pub published_on: Option<NaiveDate>,

    /// Relevance score as reported by the search backend
    pub score: Option<f64>,
}

/// Total-aware page of items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Total matches across all pages
    pub total_count: u64,

    /// 1-based page number this page was requested as
    pub page: u32,

    pub limit: u32,
}

impl<T> Page<T> {
    /// Number of pages needed to show `total_count` items
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.limit))
    }

    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Search results with the authoritative total
pub type SearchPage = Page<SearchResult>;

/// Document listing page
pub type DocumentPage = Page<Regulation>;

/// Autocomplete suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// Text to place in the search box
    pub text: String,

    /// Suggestion category (title, institution, tag), when provided
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_defaults() {
        let query = SearchQuery::new("banking");
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(
            query.to_params(),
            vec![
                ("q", "banking".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_query_clamps() {
        let query = SearchQuery::new("tax").page(0).limit(500);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);

        let query = SearchQuery::new("tax").limit(0);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_search_query_filters() {
        let params = SearchQuery::new(" energy ")
            .institution("emra")
            .kind("communique")
            .to_params();
        assert_eq!(params[0], ("q", "energy".to_string()));
        assert!(params.contains(&("institution", "emra".to_string())));
        assert!(params.contains(&("type", "communique".to_string())));
    }

    #[test]
    fn test_document_filter_params() {
        let params = DocumentFilter::default()
            .institution("central-bank")
            .page(3)
            .to_params();
        assert_eq!(
            params,
            vec![
                ("institution", "central-bank".to_string()),
                ("page", "3".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_math() {
        let page: Page<u8> = Page {
            items: vec![],
            total_count: 41,
            page: 2,
            limit: 20,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());

        let last = Page::<u8> { page: 3, ..page };
        assert!(!last.has_next());

        let empty: Page<u8> = Page {
            items: vec![],
            total_count: 0,
            page: 1,
            limit: 20,
        };
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }
}
