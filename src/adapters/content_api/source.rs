//! Typed content operations
//!
//! The `ContentSource` trait is what pages, the sitemap builder, and the CLI
//! consume. [`ContentApiClient`] implements it on top of the failover
//! transport; tests substitute in-memory sources.

use super::client::ContentApiClient;
use super::models::{
    paths, ApiDocument, ApiInstitution, ApiSearchHit, ApiSitemapItem, ApiSuggestion,
};
use crate::core::adapt;
use crate::domain::{
    encode_path_segment, ApiError, DocumentFilter, DocumentId, DocumentPage, FeedKind,
    HealthStatus, Institution, InstitutionSlug, Page, Regulation, Result, SearchPage,
    SearchQuery, SitemapEntry, Suggestion,
};
use async_trait::async_trait;
use url::form_urlencoded;

/// Default number of autocomplete suggestions
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 8;

/// Read-only access to regulation content
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All institutions
    async fn institutions(&self) -> Result<Vec<Institution>>;

    /// One institution by slug
    ///
    /// The API has no single-institution endpoint, so the default looks the
    /// slug up in the full list.
    async fn institution(&self, slug: &InstitutionSlug) -> Result<Institution> {
        self.institutions()
            .await?
            .into_iter()
            .find(|i| &i.slug == slug)
            .ok_or_else(|| ApiError::NotFound(format!("Institution '{slug}'")).into())
    }

    /// One page of documents
    async fn documents(&self, filter: &DocumentFilter) -> Result<DocumentPage>;

    /// One document with full content
    async fn document(&self, id: &DocumentId) -> Result<Regulation>;

    /// Full-text search
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;

    /// Search-box suggestions
    ///
    /// Never fails: suggestions are an enhancement, so any error yields an
    /// empty list.
    async fn autocomplete(&self, text: &str, limit: u32) -> Vec<Suggestion>;

    /// Entries of one sitemap feed
    async fn sitemap_feed(&self, feed: FeedKind) -> Result<Vec<SitemapEntry>>;

    async fn sitemap_institutions(&self) -> Result<Vec<SitemapEntry>> {
        self.sitemap_feed(FeedKind::Institutions).await
    }

    async fn sitemap_documents(&self) -> Result<Vec<SitemapEntry>> {
        self.sitemap_feed(FeedKind::Documents).await
    }

    /// Backend health, through the normal failover path
    async fn health(&self) -> Result<HealthStatus>;
}

/// Append query-string pairs to a path
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    format!("{path}?{}", serializer.finish())
}

#[async_trait]
impl ContentSource for ContentApiClient {
    async fn institutions(&self) -> Result<Vec<Institution>> {
        let raw: Vec<ApiInstitution> = self.call(paths::INSTITUTIONS).await?;
        let institutions = adapt::institutions(raw);
        tracing::debug!(count = institutions.len(), "Fetched institutions");
        Ok(institutions)
    }

    async fn documents(&self, filter: &DocumentFilter) -> Result<DocumentPage> {
        let endpoint = with_query(paths::DOCUMENTS, &filter.to_params());
        let response = self.call_enveloped::<Vec<ApiDocument>>(&endpoint).await?;
        let total = response.total();
        let items: Vec<Regulation> = response.data.into_iter().map(adapt::regulation).collect();

        Ok(Page {
            total_count: total.unwrap_or(items.len() as u64),
            items,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn document(&self, id: &DocumentId) -> Result<Regulation> {
        let endpoint = format!("{}/{}", paths::DOCUMENTS, encode_path_segment(id.as_str()));
        match self.call::<ApiDocument>(&endpoint).await {
            Ok(raw) => Ok(adapt::regulation(raw)),
            // Every host answered 404: the document does not exist anywhere.
            Err(e)
                if matches!(
                    e.as_api(),
                    Some(ApiError::AllServersUnavailable { last_status: 404, .. })
                ) =>
            {
                Err(ApiError::NotFound(format!("Regulation {id}")).into())
            }
            Err(e) => Err(e),
        }
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let endpoint = with_query(paths::SEARCH, &query.to_params());
        let response = self.call_enveloped::<Vec<ApiSearchHit>>(&endpoint).await?;
        let total = response.total();
        let results: Vec<_> = response.data.into_iter().map(adapt::search_result).collect();

        tracing::debug!(
            query = %query.text,
            page = query.page,
            results = results.len(),
            total = ?total,
            "Search completed"
        );

        Ok(Page {
            total_count: total.unwrap_or(results.len() as u64),
            items: results,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn autocomplete(&self, text: &str, limit: u32) -> Vec<Suggestion> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let endpoint = with_query(
            paths::AUTOCOMPLETE,
            &[("q", text.to_string()), ("limit", limit.to_string())],
        );

        match self.call::<Vec<ApiSuggestion>>(&endpoint).await {
            Ok(raw) => {
                let mut suggestions = adapt::suggestions(raw);
                suggestions.truncate(limit as usize);
                suggestions
            }
            Err(e) => {
                tracing::warn!(query = %text, error = %e, "Autocomplete failed, showing no suggestions");
                Vec::new()
            }
        }
    }

    async fn sitemap_feed(&self, feed: FeedKind) -> Result<Vec<SitemapEntry>> {
        let endpoint = format!("{}/{}", paths::SITEMAP, feed.as_str());
        let raw: Vec<ApiSitemapItem> = self.call(&endpoint).await?;
        Ok(adapt::sitemap_entries(feed, raw))
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.call(paths::HEALTH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let endpoint = with_query(
            paths::SEARCH,
            &[("q", "capital markets & banks".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(endpoint, "/api/v1/search?q=capital+markets+%26+banks&page=2");
    }

    #[test]
    fn test_with_query_without_params() {
        assert_eq!(with_query(paths::DOCUMENTS, &[]), "/api/v1/documents");
    }
}
