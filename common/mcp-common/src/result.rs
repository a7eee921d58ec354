//! Result helpers for MCP tool responses
//!
//! Successful tool calls carry one text content item; failed calls that the
//! caller should see (bad input, rejected or failed queries) are returned as
//! tool-level errors with `is_error` set instead of protocol errors.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::error::internal_error;

/// Create a successful response holding pretty-printed JSON
///
/// Fails with an internal protocol error only if `data` cannot be
/// serialized.
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// async fn run_query(&self) -> Result<CallToolResult, McpError> {
///     let rows = self.collect_rows().await;
///     json_success(&rows)
/// }
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| internal_error(format!("Failed to serialize tool result: {}", e)))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create a tool-level error response
///
/// The server keeps running; the message is shown to the caller as the
/// tool's output with `is_error: true`.
pub fn tool_error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// First text content of a result, if any
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .iter()
        .find_map(|c| c.as_text().map(|t| t.text.as_str()))
}
