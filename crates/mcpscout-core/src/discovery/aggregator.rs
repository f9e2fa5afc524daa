//! Fan-out aggregation and ranking across source adapters.
//!
//! Fault isolation contract: each adapter runs in its own task under its own
//! deadline. A panicking or deadline-blown adapter contributes nothing; the
//! call as a whole fails only when every enabled adapter broke AND the cache
//! had nothing to fall back on. Everything short of that degrades to fewer
//! results.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::SearchResult;
use crate::repository::CacheStore;

use super::cache::query_signature;
use super::source::SourceAdapter;

/// Per-request options on top of `(query, limit)`.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Adapter IDs to query; empty means all registered adapters.
    pub sources: Vec<String>,
    /// Drop results scoring below this threshold.
    pub min_confidence: f64,
    /// Apply query-relevance boosts on top of the confidence ordering.
    pub relevance_ranking: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sources: vec![],
            min_confidence: 0.0,
            relevance_ranking: true,
        }
    }
}

/// Tuning knobs for the aggregator.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// How long a completed ranking stays servable from cache.
    pub cache_ttl: Duration,
    /// Per-adapter deadline; a slower adapter is cut off and counted failed.
    pub adapter_deadline: Duration,
    /// Domains earning the small relevance boost.
    pub preferred_domains: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            adapter_deadline: Duration::from_secs(60),
            preferred_domains: vec![
                "ai".to_string(),
                "development".to_string(),
                "productivity".to_string(),
            ],
        }
    }
}

/// The only discovery failure that reaches callers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("all discovery sources failed and no cached results were available")]
    AllSourcesFailed,
}

/// Merges, deduplicates, ranks, and caches adapter output.
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    cache: Arc<dyn CacheStore>,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            adapters,
            cache,
            config: AggregatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// IDs of all registered adapters.
    pub fn adapter_ids(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.id()).collect()
    }

    /// Run one ranked search, best results first.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        opts: &SearchOptions,
    ) -> Result<Vec<SearchResult>, DiscoveryError> {
        let enabled = self.enabled_adapters(opts);
        let source_ids: Vec<String> = enabled.iter().map(|a| a.id().to_string()).collect();
        let key = query_signature(query, limit, &source_ids, opts.min_confidence);

        match self.cache.get(&key).await {
            Ok(Some(mut cached)) => {
                info!("Returning cached results for '{}'", query);
                cached.truncate(limit);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed, continuing uncached: {}", e),
        }

        if enabled.is_empty() {
            return Ok(vec![]);
        }

        let (merged, failures) = self.fan_out(&enabled, query, limit).await;
        if failures == enabled.len() {
            return Err(DiscoveryError::AllSourcesFailed);
        }

        let deduped = dedup_first_wins(merged);
        let mut results: Vec<SearchResult> = deduped
            .into_iter()
            .filter(|r| r.confidence_score >= opts.min_confidence)
            .collect();

        self.rank(&mut results, query, opts);
        results.truncate(limit);

        if let Err(e) = self.cache.put(&key, &results, self.config.cache_ttl).await {
            warn!("Cache write failed: {}", e);
        }

        info!("Search for '{}' produced {} results", query, results.len());
        Ok(results)
    }

    fn enabled_adapters(&self, opts: &SearchOptions) -> Vec<Arc<dyn SourceAdapter>> {
        if opts.sources.is_empty() {
            return self.adapters.clone();
        }

        let wanted: Vec<String> = opts.sources.iter().map(|s| s.to_lowercase()).collect();
        self.adapters
            .iter()
            .filter(|a| wanted.iter().any(|w| w == a.id()))
            .cloned()
            .collect()
    }

    /// Run every enabled adapter concurrently, isolating faults per adapter.
    /// Returns the concatenated results and how many adapters broke.
    async fn fan_out(
        &self,
        enabled: &[Arc<dyn SourceAdapter>],
        query: &str,
        limit: usize,
    ) -> (Vec<SearchResult>, usize) {
        let deadline = self.config.adapter_deadline;
        let tasks: Vec<_> = enabled
            .iter()
            .map(|adapter| {
                let adapter = adapter.clone();
                let query = query.to_string();
                tokio::spawn(async move {
                    tokio::time::timeout(deadline, adapter.discover(&query, limit)).await
                })
            })
            .collect();

        let mut merged = Vec::new();
        let mut failures = 0;

        for (task, adapter) in tasks.into_iter().zip(enabled) {
            match task.await {
                Ok(Ok(results)) => {
                    info!("Adapter '{}' contributed {} results", adapter.id(), results.len());
                    merged.extend(results);
                }
                Ok(Err(_)) => {
                    warn!(
                        "Adapter '{}' exceeded its {}s deadline",
                        adapter.id(),
                        deadline.as_secs()
                    );
                    failures += 1;
                }
                Err(e) => {
                    warn!("Adapter '{}' task failed: {}", adapter.id(), e);
                    failures += 1;
                }
            }
        }

        (merged, failures)
    }

    /// Order best-first. The relevance boosts affect ordering only; the
    /// stored `confidence_score` is never rewritten.
    fn rank(&self, results: &mut [SearchResult], query: &str, opts: &SearchOptions) {
        let query_lower = query.to_lowercase();
        let ordering_score = |result: &SearchResult| -> f64 {
            let mut score = result.confidence_score;
            if opts.relevance_ranking {
                if result.name.to_lowercase().contains(&query_lower) {
                    score += 0.2;
                }
                if result.description.to_lowercase().contains(&query_lower) {
                    score += 0.1;
                }
                if self.config.preferred_domains.contains(&result.domain) {
                    score += 0.05;
                }
            }
            score
        };

        results.sort_by(|a, b| {
            ordering_score(b)
                .partial_cmp(&ordering_score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// Deduplicate on `(lowercased name, source_url)`; the first occurrence wins
/// and later duplicates are dropped, not merged.
fn dedup_first_wins(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = std::collections::HashSet::new();
    results
        .into_iter()
        .filter(|result| seen.insert(result.dedup_key()))
        .collect()
}
