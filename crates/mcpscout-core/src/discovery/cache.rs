//! Result cache keys and the in-memory store.
//!
//! Keys are deterministic signatures over the normalized query parameters,
//! so equivalent requests (same query modulo case/whitespace, same limit,
//! same source set in any order, same threshold) share one entry.

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::SearchResult;
use crate::repository::{CacheStore, RepoResult};

/// Compute the cache key for one search request.
pub fn query_signature(query: &str, limit: usize, sources: &[String], min_confidence: f64) -> String {
    let mut sources: Vec<String> = sources.iter().map(|s| s.to_lowercase()).collect();
    sources.sort();

    let mut hasher = Sha256::new();
    hasher.update(query.trim().to_lowercase().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(limit.to_string().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(sources.join(",").as_bytes());
    hasher.update(b"\x1f");
    hasher.update(format!("{:.2}", min_confidence).as_bytes());

    format!("search:{:x}", hasher.finalize())
}

/// In-memory cache store with lazy expiry.
///
/// Entries hold the serialized snapshot, not the live results, so later
/// mutation of in-flight values can never corrupt a cached list. Expiry uses
/// the tokio clock, which paused-runtime tests can advance virtually.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, MemoryCacheEntry>,
}

struct MemoryCacheEntry {
    expires_at: Instant,
    snapshot: String,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> RepoResult<Option<Vec<SearchResult>>> {
        // The map guard must be released before any remove on the same key.
        let lookup = self.entries.get(key).map(|entry| {
            if entry.expires_at > Instant::now() {
                Some(entry.snapshot.clone())
            } else {
                None
            }
        });

        match lookup {
            None => Ok(None),
            Some(Some(snapshot)) => Ok(Some(serde_json::from_str(&snapshot)?)),
            Some(None) => {
                // Expired: evict lazily and report absent.
                self.entries.remove(key);
                debug!("Evicted expired cache entry {}", key);
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, results: &[SearchResult], ttl: Duration) -> RepoResult<()> {
        let snapshot = serde_json::to_string(results)?;
        self.entries.insert(
            key.to_string(),
            MemoryCacheEntry {
                expires_at: Instant::now() + ttl,
                snapshot,
            },
        );
        Ok(())
    }
}
