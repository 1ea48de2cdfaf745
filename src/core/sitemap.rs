//! Sitemap generation
//!
//! Builds a sitemaps.org `urlset` document for the public site from the
//! static pages plus the institution and document sitemap feeds.

use crate::adapters::content_api::ContentSource;
use crate::domain::{Result, SitemapEntry};
use chrono::NaiveDate;
use std::fmt::Write as _;

/// Static pages always present in the sitemap
pub const STATIC_PAGES: [&str; 6] = ["/", "/about", "/privacy", "/careers", "/faq", "/contact"];

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub last_modified: Option<NaiveDate>,
}

/// Sitemap builder rooted at the public site's base URL
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    site_base_url: String,
}

impl SitemapBuilder {
    pub fn new(site_base_url: impl Into<String>) -> Self {
        let site_base_url = site_base_url.into().trim_end_matches('/').to_string();
        Self { site_base_url }
    }

    /// Collect all sitemap URLs from a content source
    ///
    /// # Errors
    ///
    /// Fails if either feed cannot be fetched. A partial sitemap would make
    /// search engines drop the missing pages.
    pub async fn collect(&self, source: &dyn ContentSource) -> Result<Vec<SitemapUrl>> {
        let institutions = source.sitemap_institutions().await?;
        let documents = source.sitemap_documents().await?;

        tracing::info!(
            institutions = institutions.len(),
            documents = documents.len(),
            "Collected sitemap feeds"
        );

        let mut urls: Vec<SitemapUrl> = STATIC_PAGES
            .iter()
            .map(|path| SitemapUrl {
                loc: self.absolute(path),
                last_modified: None,
            })
            .collect();

        urls.extend(
            institutions
                .iter()
                .chain(documents.iter())
                .map(|entry| self.entry_url(entry)),
        );

        Ok(urls)
    }

    /// Collect and render in one step
    pub async fn build(&self, source: &dyn ContentSource) -> Result<String> {
        let urls = self.collect(source).await?;
        Ok(render(&urls))
    }

    fn entry_url(&self, entry: &SitemapEntry) -> SitemapUrl {
        SitemapUrl {
            loc: self.absolute(&entry.page_path()),
            last_modified: entry.last_modified,
        }
    }

    fn absolute(&self, path: &str) -> String {
        if path == "/" {
            format!("{}/", self.site_base_url)
        } else {
            format!("{}{path}", self.site_base_url)
        }
    }
}

/// Render URLs as sitemap XML
pub fn render(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\">");
    for url in urls {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&url.loc));
        if let Some(date) = url.last_modified {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", date.format("%Y-%m-%d"));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
