//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without a
//! child process or a stdio transport in between. The memgraph server's
//! tool tests drive it through this trait against a fake connection.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let result = server
//!     .call_tool("run_query", serde_json::json!({ "query": "MATCH (n) RETURN n" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// MCP protocol error raised by the tool
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Decode tool arguments the way the stdio transport does
///
/// A `null` argument value is treated as an empty object so tools whose
/// parameters are all optional can be called with no arguments.
pub fn decode_params<T: DeserializeOwned>(params: Value) -> EmbeddableResult<T> {
    let params = match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    Ok(serde_json::from_value(params)?)
}

/// Trait for MCP servers that can be executed in-process
///
/// Implementations must be `Send + Sync`; tool calls may run concurrently
/// from several tasks.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name as used in MCP configuration files
    fn server_name(&self) -> &str;

    /// All tools with their names, descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name
    ///
    /// Tool-level failures come back as `Ok` results with `is_error` set.
    /// `Err` is reserved for unknown tools, undecodable arguments and
    /// protocol errors.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Whether a tool with this name is registered
    fn has_tool(&self, name: &str) -> bool {
        self.list_tools().iter().any(|t| t.name == name)
    }
}
