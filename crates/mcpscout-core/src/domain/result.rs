//! Discovery results and the stored library record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FileType;

/// The canonical record for one discovered MCP.
///
/// Produced by a source adapter, owned by the aggregator once merged. The
/// result cache stores serialized snapshots of these, never live references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub description: String,
    pub source_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub domain: String,
    /// True iff the document passed the strict shape contract.
    pub validated: bool,
    /// The validated document, present only when `validated` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default)]
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    pub source_platform: String,
    pub confidence_score: f64,
}

impl SearchResult {
    /// Identity key used for first-wins deduplication across adapters.
    pub fn dedup_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.source_url.clone())
    }
}

/// An MCP saved into the local library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMcp {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Raw schema document text as ingested.
    pub schema_content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub domain: String,
    pub validated: bool,
    pub popularity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub source_platform: String,
    pub confidence_score: f64,
    #[serde(default)]
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub stars: i64,
    pub created_at: DateTime<Utc>,
}

/// Sort order for library listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McpSortKey {
    #[default]
    Popularity,
    Name,
    CreatedAt,
    ConfidenceScore,
}

/// Filters for library listings.
#[derive(Debug, Clone, Default)]
pub struct McpFilter {
    /// Exact domain match; `None` (or "all" at the API layer) means any.
    pub domain: Option<String>,
    /// Substring match against the tag set.
    pub tag: Option<String>,
    pub validated: Option<bool>,
    pub sort_by: McpSortKey,
    pub limit: usize,
}

impl McpFilter {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}
