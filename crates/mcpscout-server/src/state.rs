//! Shared application state for the HTTP handlers.

use std::sync::Arc;

use mcpscout_core::{Aggregator, McpRepository};

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Discovery pipeline entry point.
    pub aggregator: Arc<Aggregator>,
    /// MCP library persistence.
    pub mcps: Arc<dyn McpRepository>,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, mcps: Arc<dyn McpRepository>) -> Self {
        Self { aggregator, mcps }
    }
}
