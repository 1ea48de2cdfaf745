//! Sitemap feed and health models

use super::ids::encode_path_segment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which sitemap feed an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Institutions,
    Documents,
}

impl FeedKind {
    /// Path segment of the feed under `/api/v1/sitemap/`
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Institutions => "institutions",
            FeedKind::Documents => "documents",
        }
    }

    /// Public-site path for an entry of this feed
    pub fn page_path(&self, key: &str) -> String {
        match self {
            FeedKind::Institutions => format!("/institutions/{}", encode_path_segment(key)),
            FeedKind::Documents => format!("/regulations/{}", encode_path_segment(key)),
        }
    }
}

/// One entry of a sitemap feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SitemapEntry {
    pub feed: FeedKind,

    /// Slug for institutions, id for documents
    pub key: String,

    /// Last modification date, when known
    pub last_modified: Option<NaiveDate>,
}

impl SitemapEntry {
    pub fn page_path(&self) -> String {
        self.feed.page_path(&self.key)
    }
}

/// Payload of `GET /api/v1/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(
            self.status.to_lowercase().as_str(),
            "ok" | "healthy" | "up" | "pass"
        )
    }
}

/// Result of probing a single candidate host
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HostHealth {
    pub base_url: String,
    pub healthy: bool,
    pub latency_ms: u128,
    pub version: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_paths() {
        let entry = SitemapEntry {
            feed: FeedKind::Documents,
            key: "4821".to_string(),
            last_modified: None,
        };
        assert_eq!(entry.page_path(), "/regulations/4821");
        assert_eq!(
            FeedKind::Institutions.page_path("central-bank"),
            "/institutions/central-bank"
        );
    }

    #[test]
    fn test_feed_path_keeps_key_in_one_segment() {
        let entry = SitemapEntry {
            feed: FeedKind::Documents,
            key: "2024/113".to_string(),
            last_modified: None,
        };
        assert_eq!(entry.page_path(), "/regulations/2024%2F113");
    }

    #[test]
    fn test_health_status_is_ok() {
        let ok: HealthStatus = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(ok.is_ok());
        assert_eq!(ok.version, None);

        let degraded = HealthStatus {
            status: "degraded".to_string(),
            version: Some("1.2.0".to_string()),
        };
        assert!(!degraded.is_ok());
    }
}
