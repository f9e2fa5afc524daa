//! Hugging Face hub adapter.
//!
//! The hub's search API lists matching repositories but knows nothing about
//! files inside them, so each hit is probed for a handful of well-known MCP
//! filenames at its raw-content root. The first readable MCP per repository
//! wins; the rest of the probes are skipped.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::SearchResult;

use crate::discovery::fetcher::ContentFetcher;
use crate::discovery::rate_limit::RateLimiter;
use crate::discovery::source::{build_result, CandidateContext, SourceAdapter, REQUEST_DELAY};

const DEFAULT_BASE: &str = "https://huggingface.co";

/// Filenames probed inside each matching repository.
const MCP_PROBE_FILES: &[&str] = &["mcp.json", "mcp.yaml", "schema.json", "tools.json"];

#[derive(Debug, Deserialize)]
struct HubItem {
    id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    likes: Option<u64>,
}

/// Discovers MCP documents on the Hugging Face hub.
pub struct HuggingFaceAdapter {
    fetcher: ContentFetcher,
    base: String,
}

impl HuggingFaceAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            fetcher: ContentFetcher::new(client, Arc::new(RateLimiter::new(REQUEST_DELAY))),
            base: DEFAULT_BASE.to_string(),
        }
    }

    /// Override the hub base URL (useful for testing).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Override the inter-request delay (default 1s).
    pub fn with_request_delay(mut self, delay: std::time::Duration) -> Self {
        self.fetcher = self.fetcher.with_interval(delay);
        self
    }

    fn listing_urls(&self, query: &str, limit: usize) -> Vec<String> {
        vec![
            format!(
                "{}/api/datasets?search={}&limit={}",
                self.base,
                urlencoding::encode(&format!("{} mcp", query)),
                limit.max(1)
            ),
            format!(
                "{}/api/models?search={}&limit={}",
                self.base,
                urlencoding::encode(&format!("{} context protocol", query)),
                limit.max(1)
            ),
        ]
    }

    async fn probe_repository(&self, item: &HubItem) -> Option<SearchResult> {
        for filename in MCP_PROBE_FILES {
            let file_url = format!("{}/{}/raw/main/{}", self.base, item.id, filename);
            let Some(content) = self.fetcher.fetch(&file_url).await else {
                continue;
            };

            let repo_url = format!("{}/{}", self.base, item.id);
            let ctx = CandidateContext {
                title: &item.id,
                description: item.description.as_deref().unwrap_or(""),
                url: &repo_url,
                repository: Some(&item.id),
            };

            if let Some(result) = build_result(&content, &ctx, "huggingface", item.likes) {
                return Some(result);
            }
        }

        None
    }
}

#[async_trait]
impl SourceAdapter for HuggingFaceAdapter {
    fn id(&self) -> &'static str {
        "huggingface"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for listing_url in self.listing_urls(query, limit) {
            let Some(payload) = self.fetcher.fetch_json(&listing_url).await else {
                debug!("Hub listing returned nothing for {}", listing_url);
                continue;
            };

            let items: Vec<HubItem> = match serde_json::from_value(payload) {
                Ok(items) => items,
                Err(e) => {
                    debug!("Unexpected hub listing payload: {}", e);
                    continue;
                }
            };

            // Each listing contributes at most half the budget, mirroring the
            // dataset/model split.
            let per_listing = (limit / 2).max(1);
            for item in items.iter().take(per_listing) {
                if results.len() >= limit {
                    break;
                }
                if let Some(result) = self.probe_repository(item).await {
                    results.push(result);
                }
            }

            if results.len() >= limit {
                break;
            }
        }

        info!(
            "Hugging Face search for '{}' produced {} results",
            query,
            results.len()
        );
        results
    }
}
