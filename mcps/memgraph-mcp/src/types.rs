//! Response and error types for Memgraph MCP tools

use mcp_common::{json_success, text_success, CallToolResult, IntoToolResult, McpResult};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::graph::GraphError;

/// Introspection query behind `get_schema`
pub const SCHEMA_QUERY: &str = "SHOW SCHEMA INFO;";

pub const NO_RECORDS_MESSAGE: &str = "Query executed successfully with no records returned";
pub const NO_SCHEMA_MESSAGE: &str = "No schema information available.";

/// One record rendered as column name -> JSON value
pub type ResultRow = Map<String, Value>;

// ============================================================================
// Response Types
// ============================================================================

/// Result of `run_query`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    /// The query succeeded without returning records
    Empty {
        message: &'static str,
        columns: Vec<String>,
    },
    Rows {
        columns: Vec<String>,
        rows: Vec<ResultRow>,
        count: usize,
    },
}

impl QueryResponse {
    pub fn new(columns: Vec<String>, rows: Vec<ResultRow>) -> Self {
        if rows.is_empty() {
            QueryResponse::Empty {
                message: NO_RECORDS_MESSAGE,
                columns,
            }
        } else {
            QueryResponse::Rows {
                count: rows.len(),
                columns,
                rows,
            }
        }
    }
}

impl IntoToolResult for QueryResponse {
    fn into_tool_result(self) -> McpResult<CallToolResult> {
        json_success(&self)
    }
}

/// Result of `get_schema`
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaResponse {
    Empty,
    Schema(Vec<ResultRow>),
}

#[derive(Serialize)]
struct SchemaBody<'a> {
    schema: &'a [ResultRow],
}

impl IntoToolResult for SchemaResponse {
    fn into_tool_result(self) -> McpResult<CallToolResult> {
        match self {
            SchemaResponse::Empty => Ok(text_success(NO_SCHEMA_MESSAGE)),
            SchemaResponse::Schema(rows) => json_success(&SchemaBody { schema: &rows }),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Per-request failures, reported to the caller as tool-level errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Potentially unsafe query detected. Set 'unsafe' to true to execute.")]
    UnsafeQuery { keyword: &'static str },

    #[error("Query execution failed: {0}")]
    Execution(#[source] GraphError),

    #[error("Error processing results: {0}")]
    Results(#[source] GraphError),

    #[error("Failed to get schema information: {0}")]
    Schema(#[source] GraphError),

    #[error("Error processing schema results: {0}")]
    SchemaResults(#[source] GraphError),
}
