//! Curated-list adapter.
//!
//! Walks awesome-list READMEs and topic pages for links into code-hosting
//! platforms, then fetches and classifies each linked document. Markdown is
//! parsed with a link regex; HTML topic pages with an href regex. Both are
//! link extraction only, never full markup parsing.

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

/// Default curated sources: the canonical servers list plus the GitHub topic
/// pages where MCP collections accumulate.
const DEFAULT_LIST_URLS: &[&str] = &[
    "https://raw.githubusercontent.com/modelcontextprotocol/servers/main/README.md",
    "https://github.com/topics/mcp",
    "https://github.com/topics/model-context-protocol",
];

/// Most links followed per listing, bounding worst-case latency.
const MAX_CANDIDATES_PER_LIST: usize = 25;

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap();
    static ref HTML_HREF: Regex = Regex::new(r#"href="(https?://[^"]+)""#).unwrap();
}

/// A link pulled out of a listing: display text plus target.
#[derive(Debug, Clone, PartialEq)]
struct ListedLink {
    title: String,
    url: String,
}

/// Discovers MCP documents referenced from curated lists.
pub struct CuratedListAdapter {
    fetcher: ContentFetcher,
    list_urls: Vec<String>,
}

impl CuratedListAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            fetcher: ContentFetcher::new(client, Arc::new(RateLimiter::new(REQUEST_DELAY))),
            list_urls: DEFAULT_LIST_URLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override the curated source list (useful for testing).
    pub fn with_list_urls(mut self, list_urls: Vec<String>) -> Self {
        self.list_urls = list_urls;
        self
    }

    /// Override the inter-request delay (default 1s).
    pub fn with_request_delay(mut self, delay: std::time::Duration) -> Self {
        self.fetcher = self.fetcher.with_interval(delay);
        self
    }

    async fn follow_link(&self, link: &ListedLink) -> Option<SearchResult> {
        // "View" links are rewritten to raw content; anything else is
        // fetched as-is and left to the classifier.
        let content_url = if link.url.contains("/blob/") {
            link.url.replacen("/blob/", "/raw/", 1)
        } else {
            link.url.clone()
        };

        let content = self.fetcher.fetch(&content_url).await?;
        let repository = repository_slug(&link.url);
        let ctx = CandidateContext {
            title: &link.title,
            description: "",
            url: &link.url,
            repository: repository.as_deref(),
        };

        build_result(&content, &ctx, "awesome", None)
    }
}

#[async_trait]
impl SourceAdapter for CuratedListAdapter {
    fn id(&self) -> &'static str {
        "awesome"
    }

    async fn discover(&self, _query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for list_url in &self.list_urls {
            let Some(listing) = self.fetcher.fetch(list_url).await else {
                continue;
            };

            let links = if list_url.ends_with(".md") {
                extract_markdown_links(&listing)
            } else {
                extract_html_links(&listing)
            };

            for link in links.iter().take(MAX_CANDIDATES_PER_LIST) {
                if results.len() >= limit {
                    break;
                }
                if let Some(result) = self.follow_link(link).await {
                    results.push(result);
                }
            }

            if results.len() >= limit {
                break;
            }
        }

        info!("Curated lists produced {} results", results.len());
        results
    }
}

/// Pull code-hosting links out of a markdown listing.
fn extract_markdown_links(markdown: &str) -> Vec<ListedLink> {
    MARKDOWN_LINK
        .captures_iter(markdown)
        .filter_map(|caps| {
            let url = caps[2].to_string();
            if url.contains("github.com") || url.contains("gitlab.com") {
                Some(ListedLink {
                    title: caps[1].to_string(),
                    url,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Pull absolute code-hosting links out of an HTML listing.
fn extract_html_links(html: &str) -> Vec<ListedLink> {
    let mut links: Vec<ListedLink> = Vec::new();
    for caps in HTML_HREF.captures_iter(html) {
        let url = caps[1].to_string();
        if !(url.contains("github.com") || url.contains("gitlab.com")) {
            continue;
        }
        if links.iter().any(|l| l.url == url) {
            continue;
        }
        links.push(ListedLink {
            title: String::new(),
            url,
        });
    }
    links
}
