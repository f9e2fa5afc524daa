//! # McpScout Server
//!
//! HTTP API exposing the discovery pipeline and the MCP library.
//! Self-contained with dependency injection: handlers see only `AppState`.

pub mod handlers;
mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Build the API router.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/mcps", get(handlers::list_mcps).post(handlers::create_mcp))
        .route("/mcps/search", get(handlers::search_mcps))
        .route("/mcps/search/enhanced", post(handlers::enhanced_search))
        .route(
            "/mcps/{id}",
            get(handlers::get_mcp).delete(handlers::delete_mcp),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let router = router(state, config.enable_cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("McpScout API listening on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
