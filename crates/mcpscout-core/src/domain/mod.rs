//! Domain entities and value objects
//!
//! This module contains all domain-level types for McpScout:
//! - Parsed documents and the MCP shape contract (`document`)
//! - Discovery results and the stored library record (`result`)

mod document;
mod result;

pub use document::*;
pub use result::*;
