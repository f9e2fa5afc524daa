//! General web-search adapter.
//!
//! Queries the DuckDuckGo HTML endpoint (the scraping-tolerant one), pulls
//! absolute result links whose URLs even vaguely promise structured MCP
//! content, and classifies whatever they serve.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::info;

use crate::domain::SearchResult;

use crate::discovery::fetcher::ContentFetcher;
use crate::discovery::rate_limit::RateLimiter;
use crate::discovery::source::{
    build_result, repository_slug, CandidateContext, SourceAdapter, REQUEST_DELAY,
};

const DEFAULT_SEARCH_BASE: &str = "https://duckduckgo.com/html";

/// URL substrings that make a search hit worth fetching.
const CANDIDATE_MARKERS: &[&str] = &[".json", ".yaml", ".yml", "mcp"];

lazy_static! {
    static ref RESULT_HREF: Regex = Regex::new(r#"href="(https?://[^"]+)""#).unwrap();
}

/// Discovers MCP documents through general web search.
pub struct WebSearchAdapter {
    fetcher: ContentFetcher,
    search_base: String,
}

impl WebSearchAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            fetcher: ContentFetcher::new(client, Arc::new(RateLimiter::new(REQUEST_DELAY))),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
        }
    }

    /// Override the search endpoint (useful for testing).
    pub fn with_search_base(mut self, search_base: impl Into<String>) -> Self {
        self.search_base = search_base.into();
        self
    }

    /// Override the inter-request delay (default 1s).
    pub fn with_request_delay(mut self, delay: std::time::Duration) -> Self {
        self.fetcher = self.fetcher.with_interval(delay);
        self
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/?q={}",
            self.search_base,
            urlencoding::encode(&format!("{} mcp json filetype:json", query))
        )
    }
}

#[async_trait]
impl SourceAdapter for WebSearchAdapter {
    fn id(&self) -> &'static str {
        "web"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        let search_url = self.search_url(query);
        let Some(html) = self.fetcher.fetch(&search_url).await else {
            info!("Web search unreachable for '{}'", query);
            return results;
        };

        // Fetch twice the budget's worth of candidates; many hits will be
        // HTML pages the classifier rejects.
        for candidate in extract_candidate_urls(&html, limit * 2) {
            if results.len() >= limit {
                break;
            }

            let Some(content) = self.fetcher.fetch(&candidate).await else {
                continue;
            };

            let repository = repository_slug(&candidate);
            let ctx = CandidateContext {
                title: "",
                description: "",
                url: &candidate,
                repository: repository.as_deref(),
            };

            if let Some(result) = build_result(&content, &ctx, "web", None) {
                results.push(result);
            }
        }

        info!("Web search for '{}' produced {} results", query, results.len());
        results
    }
}

/// Extract deduplicated candidate URLs from a search results page.
fn extract_candidate_urls(html: &str, cap: usize) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for caps in RESULT_HREF.captures_iter(html) {
        if urls.len() >= cap {
            break;
        }

        let url = caps[1].to_string();
        // Skip the search engine's own navigation links.
        if url.contains("duckduckgo.com") {
            continue;
        }
        if !CANDIDATE_MARKERS.iter().any(|marker| url.contains(marker)) {
            continue;
        }
        if urls.contains(&url) {
            continue;
        }
        urls.push(url);
    }
    urls
}
