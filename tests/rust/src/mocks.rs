//! Mock source adapters for fast, isolated pipeline tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mcpscout_core::{SearchResult, SourceAdapter};

/// Returns canned results and counts how often it was invoked.
pub struct CountingAdapter {
    id: &'static str,
    results: Vec<SearchResult>,
    calls: Arc<AtomicUsize>,
}

impl CountingAdapter {
    pub fn new(id: &'static str, results: Vec<SearchResult>) -> Arc<Self> {
        Arc::new(Self {
            id,
            results,
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Handle to the invocation counter, usable after the adapter is shared.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SourceAdapter for CountingAdapter {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn discover(&self, _query: &str, _limit: usize) -> Vec<SearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.clone()
    }
}

/// Never completes within any reasonable deadline.
pub struct HangingAdapter;

#[async_trait]
impl SourceAdapter for HangingAdapter {
    fn id(&self) -> &'static str {
        "hanging"
    }

    async fn discover(&self, _query: &str, _limit: usize) -> Vec<SearchResult> {
        tokio::time::sleep(Duration::from_secs(86_400)).await;
        vec![]
    }
}
