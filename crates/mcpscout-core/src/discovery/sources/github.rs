//! GitHub code-search adapter.
//!
//! Uses the public code-search API rather than scraping result pages: the
//! API exposes repository metadata (including star counts, which feed the
//! confidence score) and raw download URLs. Search queries are capped to
//! keep one discovery call inside GitHub's unauthenticated budget.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::SearchResult;

use crate::discovery::fetcher::ContentFetcher;
use crate::discovery::rate_limit::RateLimiter;
use crate::discovery::source::{build_result, CandidateContext, SourceAdapter, REQUEST_DELAY};

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Most search-query variants issued per discovery call.
const MAX_SEARCH_QUERIES: usize = 3;

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    #[serde(default)]
    items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CodeSearchItem {
    name: String,
    html_url: String,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    repository: Option<RepositoryInfo>,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: Option<u64>,
}

/// Discovers MCP documents through GitHub code search.
pub struct GithubAdapter {
    fetcher: ContentFetcher,
    api_base: String,
}

impl GithubAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            fetcher: ContentFetcher::new(client, Arc::new(RateLimiter::new(REQUEST_DELAY))),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (useful for testing).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the inter-request delay (default 1s).
    pub fn with_request_delay(mut self, delay: std::time::Duration) -> Self {
        self.fetcher = self.fetcher.with_interval(delay);
        self
    }

    fn search_urls(&self, query: &str, limit: usize) -> Vec<String> {
        let variants = [
            format!("{} filename:.mcp.json", query),
            format!("{} filename:.mcp.yaml", query),
            format!("model context protocol {}", query),
        ];

        variants
            .iter()
            .take(MAX_SEARCH_QUERIES)
            .map(|q| {
                format!(
                    "{}/search/code?q={}&sort=stars&order=desc&per_page={}",
                    self.api_base,
                    urlencoding::encode(q),
                    limit.max(1)
                )
            })
            .collect()
    }

    async fn process_item(&self, item: &CodeSearchItem) -> Option<SearchResult> {
        let raw_url = item
            .download_url
            .clone()
            .or_else(|| blob_to_raw(&item.html_url))?;

        let content = self.fetcher.fetch(&raw_url).await?;

        let repository = item.repository.as_ref();
        let ctx = CandidateContext {
            title: &item.name,
            description: repository
                .and_then(|r| r.description.as_deref())
                .unwrap_or(""),
            url: &item.html_url,
            repository: repository.map(|r| r.full_name.as_str()),
        };
        let stars = repository.and_then(|r| r.stargazers_count);

        build_result(&content, &ctx, "github", stars)
    }
}

#[async_trait]
impl SourceAdapter for GithubAdapter {
    fn id(&self) -> &'static str {
        "github"
    }

    async fn discover(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for search_url in self.search_urls(query, limit) {
            let Some(payload) = self.fetcher.fetch_json(&search_url).await else {
                debug!("GitHub search returned nothing for {}", search_url);
                continue;
            };

            let response: CodeSearchResponse = match serde_json::from_value(payload) {
                Ok(response) => response,
                Err(e) => {
                    debug!("Unexpected GitHub search payload: {}", e);
                    continue;
                }
            };

            for item in &response.items {
                if results.len() >= limit {
                    break;
                }
                if let Some(result) = self.process_item(item).await {
                    results.push(result);
                }
            }

            if results.len() >= limit {
                break;
            }
        }

        info!("GitHub search for '{}' produced {} results", query, results.len());
        results
    }
}

/// Rewrite a GitHub "view" URL to its raw-content counterpart.
fn blob_to_raw(html_url: &str) -> Option<String> {
    if html_url.contains("/blob/") {
        Some(html_url.replacen("/blob/", "/raw/", 1))
    } else {
        None
    }
}
