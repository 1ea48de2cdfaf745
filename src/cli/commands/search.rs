//! Search commands: `search` and `suggest`

use super::{connect, print_json, report_failure, LoadedConfig, EXIT_LOGICAL, EXIT_OK};
use crate::adapters::content_api::{ContentSource, DEFAULT_SUGGESTION_LIMIT};
use crate::domain::{SearchQuery, DEFAULT_PAGE_SIZE};
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Restrict to one institution
    #[arg(long)]
    pub institution: Option<String>,

    /// Restrict to one document type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.query.trim())
            .page(self.page)
            .limit(self.limit);
        if let Some(ref institution) = self.institution {
            query = query.institution(institution.as_str());
        }
        if let Some(ref kind) = self.kind {
            query = query.kind(kind.as_str());
        }
        query
    }

    /// Execute the search command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        if self.query.trim().is_empty() {
            eprintln!("❌ Search text cannot be empty");
            return Ok(EXIT_LOGICAL);
        }

        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        tracing::info!(query = %self.query, page = self.page, "Searching");

        let results = match client.search(&self.query()).await {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Search", &e)),
        };

        if self.json {
            return print_json(&results);
        }

        if results.items.is_empty() {
            println!("No results for \"{}\".", self.query.trim());
            return Ok(EXIT_OK);
        }

        println!(
            "🔎 {} result(s) for \"{}\" (page {} of {})",
            results.total_count,
            self.query.trim(),
            results.page,
            results.total_pages().max(1)
        );
        println!();
        for hit in &results.items {
            let institution = hit.institution_name.as_deref().unwrap_or("-");
            println!("  [{}] {} ({}, {})", hit.id, hit.title, institution, hit.status);
            if let Some(ref snippet) = hit.snippet {
                println!("      {snippet}");
            }
        }
        if results.has_next() {
            println!();
            println!("More results: --page {}", results.page + 1);
        }
        Ok(EXIT_OK)
    }
}

/// Arguments for the suggest command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Partial search text
    pub query: String,

    /// Maximum number of suggestions
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub limit: u32,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SuggestArgs {
    /// Execute the suggest command
    ///
    /// Suggestions never fail; an unreachable backend just yields none.
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let suggestions = client.autocomplete(&self.query, self.limit).await;

        if self.json {
            return print_json(&suggestions);
        }

        if suggestions.is_empty() {
            println!("No suggestions.");
            return Ok(EXIT_OK);
        }

        for suggestion in &suggestions {
            match suggestion.kind {
                Some(ref kind) => println!("  {} ({kind})", suggestion.text),
                None => println!("  {}", suggestion.text),
            }
        }
        Ok(EXIT_OK)
    }
}
