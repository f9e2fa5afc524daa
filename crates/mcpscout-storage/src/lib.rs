//! # McpScout Storage
//!
//! SQLite-backed persistence: the MCP library repository, the search-result
//! cache store, and sample-data seeding.

mod database;
pub mod repositories;
mod samples;

pub use database::Database;
pub use repositories::{SqliteCacheStore, SqliteMcpRepository};
pub use samples::seed_sample_mcps;
