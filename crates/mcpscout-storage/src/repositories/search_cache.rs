//! SQLite implementation of the search-result cache store.
//!
//! Expiry is checked in SQL on every read; stale rows are deleted on the
//! read path (lazy eviction), never by a background sweep.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use mcpscout_core::{CacheStore, SearchResult};
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use crate::Database;

/// SQLite-backed implementation of CacheStore.
pub struct SqliteCacheStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteCacheStore {
    /// Create a new SQLite cache store.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<SearchResult>>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let snapshot: Option<String> = conn
            .query_row(
                "SELECT results FROM search_cache WHERE key = ?1 AND expires_at > datetime('now')",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match snapshot {
            Some(snapshot) => Ok(Some(serde_json::from_str(&snapshot)?)),
            None => {
                // Evict the expired row, if that is why the lookup missed.
                let evicted = conn.execute(
                    "DELETE FROM search_cache WHERE key = ?1 AND expires_at <= datetime('now')",
                    params![key],
                )?;
                if evicted > 0 {
                    debug!("Evicted expired cache entry {}", key);
                }
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, results: &[SearchResult], ttl: Duration) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let snapshot = serde_json::to_string(results)?;
        conn.execute(
            "INSERT OR REPLACE INTO search_cache (key, results, created_at, expires_at)
             VALUES (?1, ?2, datetime('now'), datetime('now', '+' || ?3 || ' seconds'))",
            params![key, snapshot, ttl.as_secs() as i64],
        )?;

        Ok(())
    }
}
