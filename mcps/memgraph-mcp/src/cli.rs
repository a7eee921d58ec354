//! CLI argument definitions

use clap::Parser;

use crate::config::ConnectionOverrides;

/// Display name, reported by `--version` and in the MCP handshake
pub const SERVER_NAME: &str = "Memgraph MCP Server";

/// Crate version, reported by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, if the build environment provided it
pub const COMMIT: &str = match option_env!("MEMGRAPH_MCP_COMMIT") {
    Some(commit) => commit,
    None => "none",
};

/// Build date, if the build environment provided it
pub const BUILD_DATE: &str = match option_env!("MEMGRAPH_MCP_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

// Environment fallback for the connection flags happens in `ConnectionConfig::resolve`.
#[derive(Debug, Parser)]
#[command(name = "memgraph-mcp")]
#[command(about = "MCP server exposing a Memgraph database over stdio")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Output MCP configuration as JSON
    #[arg(long)]
    pub json: bool,

    /// Display version information
    #[arg(long)]
    pub version: bool,

    /// Memgraph connection URI (bolt://host:port)
    #[arg(long, value_name = "URI")]
    pub connection_uri: Option<String>,

    /// Memgraph username
    #[arg(long)]
    pub username: Option<String>,

    /// Memgraph password
    #[arg(long)]
    pub password: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            connection_uri: self.connection_uri.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Text printed by `--version`
pub fn version_text() -> String {
    format!(
        "{}\nVersion: {}\nCommit: {}\nBuild date: {}",
        SERVER_NAME, VERSION, COMMIT, BUILD_DATE
    )
}
