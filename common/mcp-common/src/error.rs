//! Error handling utilities for MCP servers
//!
//! Two tiers of failure reach a caller:
//!
//! - protocol errors ([`McpError`]): the request itself could not be handled,
//!   e.g. arguments that do not deserialize or a response that fails to
//!   serialize
//! - tool-level errors: the tool ran and failed. These are ordinary
//!   [`CallToolResult`]s with `is_error` set, so the server keeps serving
//!
//! [`ToolResultExt::or_tool_error`] turns a handler's `Result` into the
//! second kind.

use std::fmt::Display;

use rmcp::{model::CallToolResult, ErrorData as McpError};

use crate::result::tool_error;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// A successful handler outcome that can be rendered as a tool response
pub trait IntoToolResult {
    /// Render into a tool response, failing only on serialization errors
    fn into_tool_result(self) -> McpResult<CallToolResult>;
}

impl IntoToolResult for CallToolResult {
    fn into_tool_result(self) -> McpResult<CallToolResult> {
        Ok(self)
    }
}

/// Extension trait converting handler failures into tool-level errors
///
/// ```rust,ignore
/// use mcp_common::ToolResultExt;
///
/// async fn get_schema(&self) -> Result<CallToolResult, McpError> {
///     handlers::get_schema(self.graph.as_ref()).await.or_tool_error()
/// }
/// ```
pub trait ToolResultExt {
    /// Render `Ok` as the tool response and `Err` as a tool-level error
    /// carrying the error's `Display` text
    fn or_tool_error(self) -> McpResult<CallToolResult>;
}

impl<T, E> ToolResultExt for Result<T, E>
where
    T: IntoToolResult,
    E: Display,
{
    fn or_tool_error(self) -> McpResult<CallToolResult> {
        match self {
            Ok(outcome) => outcome.into_tool_result(),
            Err(e) => {
                tracing::warn!(error = %e, "Tool call failed");
                Ok(tool_error(e.to_string()))
            }
        }
    }
}

/// Create an internal error with a message
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}
