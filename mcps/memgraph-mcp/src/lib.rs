//! Memgraph MCP Library
//!
//! Exposes a Memgraph database to MCP hosts through two tools:
//! `run_query` (read-only unless the caller opts into unsafe mode) and
//! `get_schema`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use memgraph_mcp::{config::ConnectionConfig, MemgraphMcpServer};
//!
//! let config = ConnectionConfig::resolve(&Default::default());
//! let server = MemgraphMcpServer::connect(&config).await?;
//! mcp_common::serve_stdio(server).await?;
//! ```

pub mod cli;
pub mod config;
pub mod graph;
pub mod guard;
pub mod handlers;
pub mod launch;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::MemgraphMcpServer;

// Re-export parameter types for direct API usage
pub use params::RunQueryParams;
