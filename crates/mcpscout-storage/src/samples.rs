//! Sample MCP library entries for demos and local testing.
//!
//! Seeding is idempotent: entries are keyed by fixed IDs and saved with
//! INSERT OR REPLACE semantics, so repeated startups converge on the same
//! rows.

use anyhow::Result;
use chrono::Utc;
use mcpscout_core::{FileType, McpRepository, StoredMcp};
use serde_json::json;
use tracing::info;

/// Seed the library with the bundled sample MCPs.
pub async fn seed_sample_mcps(repo: &dyn McpRepository) -> Result<()> {
    let samples = sample_mcps();
    let count = samples.len();

    for mcp in samples {
        repo.save(&mcp).await?;
    }

    info!("Seeded {} sample MCPs", count);
    Ok(())
}

fn sample_mcps() -> Vec<StoredMcp> {
    vec![
        StoredMcp {
            id: "weather-mcp-001".to_string(),
            name: "weather.forecast".to_string(),
            description:
                "Real-time weather data and forecasting with global coverage and severe weather alerts"
                    .to_string(),
            schema_content: json!({
                "name": "weather.forecast",
                "version": "2.1.0",
                "description": "Advanced weather forecasting tools with real-time alerts",
                "tools": [
                    {
                        "name": "get_current_weather",
                        "description": "Get current weather conditions for a specific location with detailed metrics",
                        "parameters": {"location": "string", "units": "string", "include_alerts": "boolean"}
                    },
                    {
                        "name": "get_forecast",
                        "description": "Get weather forecast for next 14 days with hourly breakdown",
                        "parameters": {"location": "string", "days": "number", "units": "string", "hourly": "boolean"}
                    },
                    {
                        "name": "get_severe_alerts",
                        "description": "Get active severe weather alerts for a region",
                        "parameters": {"location": "string", "alert_types": "array"}
                    }
                ]
            })
            .to_string(),
            tags: vec![
                "weather".to_string(),
                "api".to_string(),
                "forecast".to_string(),
                "alerts".to_string(),
            ],
            domain: "weather".to_string(),
            validated: true,
            popularity: 95,
            source_url: Some(
                "https://github.com/modelcontextprotocol/servers/tree/main/src/weather".to_string(),
            ),
            source_platform: "github".to_string(),
            confidence_score: 0.95,
            file_type: FileType::Json,
            repository: Some("modelcontextprotocol/servers".to_string()),
            stars: 1250,
            created_at: Utc::now(),
        },
        StoredMcp {
            id: "search-mcp-002".to_string(),
            name: "web.search".to_string(),
            description:
                "Comprehensive web search and content retrieval with multiple search engines"
                    .to_string(),
            schema_content: json!({
                "name": "web.search",
                "version": "3.0.0",
                "description": "Multi-engine web search capabilities with content extraction",
                "tools": [
                    {
                        "name": "search_web",
                        "description": "Search the web using multiple search engines with ranking",
                        "parameters": {"query": "string", "limit": "number", "safe_search": "boolean"}
                    },
                    {
                        "name": "extract_content",
                        "description": "Extract readable content from a web page URL",
                        "parameters": {"url": "string", "include_links": "boolean"}
                    }
                ]
            })
            .to_string(),
            tags: vec![
                "search".to_string(),
                "web".to_string(),
                "api".to_string(),
                "retrieval".to_string(),
            ],
            domain: "data".to_string(),
            validated: true,
            popularity: 88,
            source_url: Some(
                "https://github.com/modelcontextprotocol/servers/tree/main/src/search".to_string(),
            ),
            source_platform: "github".to_string(),
            confidence_score: 0.92,
            file_type: FileType::Json,
            repository: Some("modelcontextprotocol/servers".to_string()),
            stars: 1250,
            created_at: Utc::now(),
        },
        StoredMcp {
            id: "filesystem-mcp-003".to_string(),
            name: "filesystem.operations".to_string(),
            description: "Secure file system operations with read/write capabilities".to_string(),
            schema_content: json!({
                "name": "filesystem.operations",
                "version": "1.0.0",
                "description": "File system operations",
                "tools": [
                    {
                        "name": "read_file",
                        "description": "Read file contents from a path",
                        "parameters": {"path": "string"}
                    },
                    {
                        "name": "write_file",
                        "description": "Write contents to a file path",
                        "parameters": {"path": "string", "content": "string"}
                    }
                ]
            })
            .to_string(),
            tags: vec![
                "filesystem".to_string(),
                "files".to_string(),
                "io".to_string(),
            ],
            domain: "development".to_string(),
            validated: true,
            popularity: 82,
            source_url: Some(
                "https://github.com/modelcontextprotocol/servers/tree/main/src/filesystem"
                    .to_string(),
            ),
            source_platform: "github".to_string(),
            confidence_score: 0.92,
            file_type: FileType::Json,
            repository: Some("modelcontextprotocol/servers".to_string()),
            stars: 1250,
            created_at: Utc::now(),
        },
    ]
}
