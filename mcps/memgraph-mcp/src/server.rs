//! MCP Server implementation for Memgraph
//!
//! Declares the tools and delegates each one to its handler. The database
//! connection is owned by the server and shared read-only by every call.

use std::sync::Arc;

use mcp_common::{
    async_trait, decode_params, CallToolResult, EmbeddableError, EmbeddableMcp,
    EmbeddableResult, McpError, ToolResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::cli::{SERVER_NAME, VERSION};
use crate::config::ConnectionConfig;
use crate::graph::{GraphConnection, GraphError, MemgraphConnection};
use crate::handlers;
use crate::params::RunQueryParams;

const INSTRUCTIONS: &str = "Memgraph graph database MCP server. \
    Use run_query to execute Cypher queries and get_schema to inspect labels, \
    relationship types and properties. Queries that write (CREATE, MERGE, SET, \
    DELETE, REMOVE, DROP) are rejected unless 'unsafe' is set to true.";

/// The Memgraph MCP Server
#[derive(Clone)]
pub struct MemgraphMcpServer {
    graph: Arc<dyn GraphConnection>,
    tool_router: ToolRouter<Self>,
}

impl MemgraphMcpServer {
    /// Create a server on top of an already open connection
    pub fn new(graph: Arc<dyn GraphConnection>) -> Self {
        Self {
            graph,
            tool_router: Self::tool_router(),
        }
    }

    /// Open and verify the Memgraph connection, then build the server
    ///
    /// Any error here means the server must not start serving.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, GraphError> {
        let connection = MemgraphConnection::connect(config).await?;
        Ok(Self::new(Arc::new(connection)))
    }
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl MemgraphMcpServer {
    #[tool(description = "Execute a Cypher query against Memgraph")]
    async fn run_query(
        &self,
        Parameters(params): Parameters<RunQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::run_query(self.graph.as_ref(), params)
            .await
            .or_tool_error()
    }

    #[tool(description = "Get schema information about the Memgraph database")]
    async fn get_schema(&self) -> Result<CallToolResult, McpError> {
        handlers::get_schema(self.graph.as_ref()).await.or_tool_error()
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for MemgraphMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: VERSION.into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for MemgraphMcpServer {
    fn server_name(&self) -> &str {
        "memgraph"
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "run_query" => {
                let params: RunQueryParams = decode_params(params)?;
                self.run_query(Parameters(params)).await.map_err(Into::into)
            }

            "get_schema" => self.get_schema().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
