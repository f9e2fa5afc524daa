//! McpScout server entry point.
//!
//! Environment:
//! - `MCPSCOUT_HOST` / `MCPSCOUT_PORT` - bind address (default 0.0.0.0:8000)
//! - `MCPSCOUT_DB` - SQLite database path (default ./mcpscout.db)
//! - `RUST_LOG` - tracing filter (default info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mcpscout_core::{sources::default_adapters, Aggregator, ContentFetcher};
use mcpscout_server::{serve, AppState, ServerConfig};
use mcpscout_storage::{seed_sample_mcps, Database, SqliteCacheStore, SqliteMcpRepository};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("MCPSCOUT_DB").unwrap_or_else(|_| "mcpscout.db".to_string());
    let db = Arc::new(Mutex::new(Database::open(&PathBuf::from(&db_path))?));
    info!("Using database at {}", db_path);

    let mcps = Arc::new(SqliteMcpRepository::new(db.clone()));
    if let Err(e) = seed_sample_mcps(mcps.as_ref()).await {
        warn!("Failed to seed sample data: {:#}", e);
    }

    // One transport handle for the whole process; adapters share it.
    let client = ContentFetcher::build_client();
    let aggregator = Arc::new(Aggregator::new(
        default_adapters(client),
        Arc::new(SqliteCacheStore::new(db)),
    ));

    let state = AppState::new(aggregator, mcps);

    let config = ServerConfig {
        host: std::env::var("MCPSCOUT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("MCPSCOUT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000),
        enable_cors: true,
    };

    serve(config, state).await
}
