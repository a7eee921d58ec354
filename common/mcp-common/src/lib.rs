//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`]
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: [`ToolResultExt`] for turning handler failures into
//!   tool-level errors
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve_stdio, ToolResultExt};
//!
//! async fn get_schema(&self) -> Result<CallToolResult, McpError> {
//!     handlers::get_schema(self.graph.as_ref()).await.or_tool_error()
//! }
//!
//! mcp_common::init_tracing("memgraph_mcp")?;
//! serve_stdio(server).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{decode_params, EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, IntoToolResult, McpResult, ToolResultExt};
pub use init::{init_tracing, serve_stdio};
pub use result::{first_text, json_success, text_success, tool_error};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
