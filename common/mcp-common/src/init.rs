//! Server initialization utilities
//!
//! Tracing setup and stdio serving shared by the MCP servers in this
//! workspace. Servers that need fallible setup before serving (opening a
//! database connection, say) build the handler themselves and hand it to
//! [`serve_stdio`].

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Logs go to stderr; stdout carries the MCP message stream.
///
/// - `RUST_LOG` filtering, with `<crate_name>=info` added by default
/// - `LOG_FORMAT=json` for structured JSON output
/// - plain text without ANSI colors otherwise
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("memgraph_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    if json_logs_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn json_logs_requested(log_format: Option<&str>) -> bool {
    log_format
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Serve an MCP handler over stdin/stdout until the peer disconnects
///
/// Returns once the transport closes. The handler (and anything it owns,
/// such as a database connection) is dropped before this returns.
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    let reason = service.waiting().await?;

    tracing::info!(?reason, "Server shutting down");
    Ok(())
}
