//! Memgraph MCP Server
//!
//! Serves `run_query` and `get_schema` over stdio. `--json` prints a launch
//! entry for MCP host configuration and `--version` prints build details;
//! both exit without touching the database.

use anyhow::{Context, Result};
use clap::Parser;

use memgraph_mcp::cli::{version_text, Cli};
use memgraph_mcp::config::ConnectionConfig;
use memgraph_mcp::launch::LaunchConfig;
use memgraph_mcp::MemgraphMcpServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_text());
        return Ok(());
    }

    if cli.json {
        let launch = LaunchConfig::for_current_exe(&cli.overrides());
        let json = serde_json::to_string(&launch).context("Failed to generate JSON")?;
        println!("{}", json);
        return Ok(());
    }

    mcp_common::init_tracing("memgraph_mcp")?;

    let config = ConnectionConfig::resolve(&cli.overrides());
    tracing::debug!(?config, "Resolved connection configuration");

    let server = match MemgraphMcpServer::connect(&config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to connect to Memgraph: {}", e);
            return Err(e).context("Failed to connect to Memgraph");
        }
    };
    tracing::info!("Connected to Memgraph database");

    tracing::info!("Starting Memgraph MCP Server...");
    mcp_common::serve_stdio(server).await
}
