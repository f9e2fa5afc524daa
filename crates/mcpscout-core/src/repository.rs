//! Repository traits for data access
//!
//! These traits define the interface for data storage without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::{McpFilter, SearchResult, StoredMcp};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// MCP library repository trait
#[async_trait]
pub trait McpRepository: Send + Sync {
    /// List library entries matching the filter
    async fn list(&self, filter: &McpFilter) -> RepoResult<Vec<StoredMcp>>;

    /// Get an entry by ID
    async fn get(&self, id: &str) -> RepoResult<Option<StoredMcp>>;

    /// Insert or replace an entry
    async fn save(&self, mcp: &StoredMcp) -> RepoResult<()>;

    /// Delete an entry; returns false when the ID was unknown
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// TTL-keyed store for ranked search results.
///
/// Values are serialized snapshots: a cached result list is a value copy,
/// never an aliasable reference into live aggregator state. Expiry is checked
/// lazily on read; no background sweep exists or is needed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a non-expired entry, evicting it first when stale
    async fn get(&self, key: &str) -> RepoResult<Option<Vec<SearchResult>>>;

    /// Store an entry, replacing any previous value (last writer wins)
    async fn put(&self, key: &str, results: &[SearchResult], ttl: Duration) -> RepoResult<()>;
}
