//! SQLite implementation of McpRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mcpscout_core::{FileType, McpFilter, McpRepository, McpSortKey, StoredMcp};
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::Mutex;

use crate::Database;

const SELECT_COLUMNS: &str = "id, name, description, schema_content, tags, domain, validated, \
     popularity, source_url, source_platform, confidence_score, file_type, repository, stars, created_at";

/// SQLite-backed implementation of McpRepository.
pub struct SqliteMcpRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteMcpRepository {
    /// Create a new SQLite MCP repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Parse a datetime string to DateTime<Utc>.
    /// Handles both RFC3339 format and SQLite's `datetime('now')` format.
    fn parse_datetime(s: &str) -> DateTime<Utc> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.with_timezone(&Utc);
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return dt.and_utc();
        }

        Utc::now()
    }

    fn row_to_mcp(row: &Row<'_>) -> rusqlite::Result<StoredMcp> {
        let tags_json: Option<String> = row.get(4)?;
        let tags = tags_json
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        let file_type = match row.get::<_, String>(11)?.as_str() {
            "json" => FileType::Json,
            "yaml" => FileType::Yaml,
            _ => FileType::Unknown,
        };

        Ok(StoredMcp {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            schema_content: row.get(3)?,
            tags,
            domain: row
                .get::<_, Option<String>>(5)?
                .unwrap_or_else(|| "general".to_string()),
            validated: row.get::<_, i64>(6)? == 1,
            popularity: row.get(7)?,
            source_url: row.get(8)?,
            source_platform: row
                .get::<_, Option<String>>(9)?
                .unwrap_or_else(|| "local".to_string()),
            confidence_score: row.get(10)?,
            file_type,
            repository: row.get(12)?,
            stars: row.get::<_, Option<i64>>(13)?.unwrap_or(0),
            created_at: Self::parse_datetime(&row.get::<_, String>(14)?),
        })
    }
}

#[async_trait]
impl McpRepository for SqliteMcpRepository {
    async fn list(&self, filter: &McpFilter) -> Result<Vec<StoredMcp>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut sql = format!("SELECT {} FROM mcps WHERE 1=1", SELECT_COLUMNS);
        let mut bindings: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref domain) = filter.domain {
            if domain != "all" {
                sql.push_str(" AND domain = ?");
                bindings.push(Box::new(domain.clone()));
            }
        }
        if let Some(validated) = filter.validated {
            sql.push_str(" AND validated = ?");
            bindings.push(Box::new(validated as i64));
        }
        if let Some(ref tag) = filter.tag {
            sql.push_str(" AND tags LIKE ?");
            bindings.push(Box::new(format!("%{}%", tag)));
        }

        sql.push_str(match filter.sort_by {
            McpSortKey::Name => " ORDER BY name ASC",
            McpSortKey::CreatedAt => " ORDER BY created_at DESC",
            McpSortKey::ConfidenceScore => " ORDER BY confidence_score DESC",
            McpSortKey::Popularity => " ORDER BY popularity DESC",
        });

        if filter.limit > 0 {
            sql.push_str(" LIMIT ?");
            bindings.push(Box::new(filter.limit as i64));
        }

        let mut stmt = conn.prepare(&sql)?;
        let mcps = stmt
            .query_map(rusqlite::params_from_iter(bindings.iter()), Self::row_to_mcp)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Library listing returned {} entries", mcps.len());

        Ok(mcps)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredMcp>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM mcps WHERE id = ?",
            SELECT_COLUMNS
        ))?;

        let mcp = stmt.query_row(params![id], Self::row_to_mcp).optional()?;

        Ok(mcp)
    }

    async fn save(&self, mcp: &StoredMcp) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT OR REPLACE INTO mcps (id, name, description, schema_content, tags, domain, \
             validated, popularity, source_url, source_platform, confidence_score, file_type, \
             repository, stars, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                mcp.id,
                mcp.name,
                mcp.description,
                mcp.schema_content,
                serde_json::to_string(&mcp.tags)?,
                mcp.domain,
                mcp.validated as i64,
                mcp.popularity,
                mcp.source_url,
                mcp.source_platform,
                mcp.confidence_score,
                mcp.file_type.as_str(),
                mcp.repository,
                mcp.stars,
                mcp.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let rows_affected = conn.execute("DELETE FROM mcps WHERE id = ?", params![id])?;

        Ok(rows_affected > 0)
    }
}
