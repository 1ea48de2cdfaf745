//! Browse commands: `institutions`, `documents`, `document`

use super::{connect, print_json, report_failure, LoadedConfig, EXIT_LOGICAL, EXIT_OK};
use crate::adapters::content_api::ContentSource;
use crate::domain::{DocumentFilter, DocumentId, InstitutionSlug, Regulation};
use clap::Args;

/// Arguments for the institutions command
#[derive(Args, Debug)]
pub struct InstitutionsArgs {
    /// Show a single institution by slug
    #[arg(long)]
    pub slug: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl InstitutionsArgs {
    /// Execute the institutions command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if let Some(ref raw) = self.slug {
            let slug = match InstitutionSlug::new(raw.as_str()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("❌ Invalid institution slug: {e}");
                    return Ok(EXIT_LOGICAL);
                }
            };
            let institution = match client.institution(&slug).await {
                Ok(i) => i,
                Err(e) => return Ok(report_failure("Loading institution", &e)),
            };
            if self.json {
                return print_json(&institution);
            }
            println!("🏛️  {}", institution.name);
            println!("  Slug: {}", institution.slug);
            println!("  Regulations: {}", institution.regulation_count);
            if let Some(ref website) = institution.website {
                println!("  Website: {website}");
            }
            if let Some(ref description) = institution.description {
                println!();
                println!("{description}");
            }
            return Ok(EXIT_OK);
        }

        let institutions = match client.institutions().await {
            Ok(list) => list,
            Err(e) => return Ok(report_failure("Loading institutions", &e)),
        };

        if self.json {
            return print_json(&institutions);
        }

        if institutions.is_empty() {
            println!("No institutions found.");
            return Ok(EXIT_OK);
        }

        println!("🏛️  {} institution(s)", institutions.len());
        println!();
        println!("{:<40} {:<45} {:>11}", "Slug", "Name", "Regulations");
        println!("{}", "-".repeat(98));
        for institution in &institutions {
            println!(
                "{:<40} {:<45} {:>11}",
                institution.slug.as_str(),
                truncate(&institution.name, 45),
                institution.regulation_count
            );
        }
        println!();
        Ok(EXIT_OK)
    }
}

/// Arguments for the documents command
#[derive(Args, Debug)]
pub struct DocumentsArgs {
    /// Filter by institution slug or id
    #[arg(long)]
    pub institution: Option<String>,

    /// Filter by document type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size
    #[arg(long, default_value_t = crate::domain::DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl DocumentsArgs {
    fn filter(&self) -> DocumentFilter {
        let mut filter = DocumentFilter::default().page(self.page).limit(self.limit);
        if let Some(ref institution) = self.institution {
            filter = filter.institution(institution.as_str());
        }
        if let Some(ref kind) = self.kind {
            filter = filter.kind(kind.as_str());
        }
        filter
    }

    /// Execute the documents command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let page = match client.documents(&self.filter()).await {
            Ok(p) => p,
            Err(e) => return Ok(report_failure("Loading documents", &e)),
        };

        if self.json {
            return print_json(&page);
        }

        println!(
            "📄 Documents (page {} of {}, {} total)",
            page.page,
            page.total_pages().max(1),
            page.total_count
        );
        println!();
        for regulation in &page.items {
            print_regulation_line(regulation);
        }
        if page.has_next() {
            println!();
            println!("More results: --page {}", page.page + 1);
        }
        Ok(EXIT_OK)
    }
}

/// Arguments for the document command
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Document id
    pub id: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl DocumentArgs {
    /// Execute the document command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let id = match DocumentId::new(self.id.as_str()) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("❌ Invalid document id: {e}");
                return Ok(EXIT_LOGICAL);
            }
        };

        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let regulation = match client.document(&id).await {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Loading document", &e)),
        };

        if self.json {
            return print_json(&regulation);
        }

        println!("📄 {}", regulation.title);
        if let Some(ref number) = regulation.number {
            println!("  Number: {number}");
        }
        if let Some(ref institution) = regulation.institution {
            println!("  Institution: {}", institution.name);
        }
        println!("  Status: {}", regulation.status);
        if let Some(date) = regulation.published_on {
            println!("  Published: {date}");
        }
        if let Some(date) = regulation.effective_on {
            println!("  Effective: {date}");
        }
        if !regulation.tags.is_empty() {
            println!("  Tags: {}", regulation.tags.join(", "));
        }
        if let Some(ref source) = regulation.source_url {
            println!("  Source: {source}");
        }
        if let Some(ref summary) = regulation.summary {
            println!();
            println!("{summary}");
        }
        if let Some(ref content) = regulation.content {
            println!();
            println!("{content}");
        }
        Ok(EXIT_OK)
    }
}

fn print_regulation_line(regulation: &Regulation) {
    let date = regulation
        .published_on
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  [{}] {} ({}, {})",
        regulation.id,
        regulation.title,
        regulation.status,
        date
    );
}

/// Shorten text to `max` characters for table output
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegulusConfig;

    #[test]
    fn test_documents_filter_from_args() {
        let args = DocumentsArgs {
            institution: Some("central-bank".to_string()),
            kind: Some("circular".to_string()),
            page: 2,
            limit: 10,
            json: false,
        };
        let params = args.filter().to_params();
        assert!(params.contains(&("institution", "central-bank".to_string())));
        assert!(params.contains(&("type", "circular".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("limit", "10".to_string())));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Banking Regulation Agency", 10), "Banking R…");
        assert_eq!(truncate("Çalışma Bakanlığı", 8).chars().count(), 8);
    }

    #[tokio::test]
    async fn test_document_rejects_blank_id() {
        let args = DocumentArgs {
            id: "   ".to_string(),
            json: false,
        };
        assert_eq!(args.execute(Ok(&RegulusConfig::default())).await.unwrap(), EXIT_LOGICAL);
    }
}
