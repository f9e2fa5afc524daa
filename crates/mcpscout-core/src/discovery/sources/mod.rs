//! Platform-specific source adapters.
//!
//! One adapter per external platform: GitHub code search, the Hugging Face
//! hub, curated awesome-lists, and general web search. Each caps its own
//! search fan-out and owns its own rate limiter.

mod curated;
mod github;
mod huggingface;
mod web;

pub use curated::CuratedListAdapter;
pub use github::GithubAdapter;
pub use huggingface::HuggingFaceAdapter;
pub use web::WebSearchAdapter;

use std::sync::Arc;

use super::SourceAdapter;

/// Build the default adapter set sharing one transport handle.
pub fn default_adapters(client: reqwest::Client) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        Arc::new(GithubAdapter::new(client.clone())),
        Arc::new(HuggingFaceAdapter::new(client.clone())),
        Arc::new(CuratedListAdapter::new(client.clone())),
        Arc::new(WebSearchAdapter::new(client)),
    ]
}
