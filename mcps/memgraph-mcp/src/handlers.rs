//! Tool handlers
//!
//! Each handler opens one session through [`GraphConnection::run`], drains
//! it, and drops the cursor before returning, so the session is released on
//! every path. An error while reading discards the rows read so far.

use crate::graph::{GraphConnection, Record};
use crate::guard;
use crate::params::RunQueryParams;
use crate::types::{QueryResponse, ResultRow, SchemaResponse, ToolError, SCHEMA_QUERY};

pub async fn run_query(
    graph: &dyn GraphConnection,
    params: RunQueryParams,
) -> Result<QueryResponse, ToolError> {
    let query = params.query.ok_or(ToolError::MissingQuery)?;

    if !params.allow_unsafe {
        if let Some(keyword) = guard::find_blocked_keyword(&query) {
            tracing::warn!(keyword, "Blocked potentially unsafe query");
            return Err(ToolError::UnsafeQuery { keyword });
        }
    }

    tracing::debug!(%query, unsafe_mode = params.allow_unsafe, "Running query");

    let mut cursor = graph.run(&query).await.map_err(ToolError::Execution)?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    while let Some(record) = cursor.next().await.map_err(ToolError::Results)? {
        if columns.is_empty() {
            columns = record.keys();
        }
        rows.push(reshaped_row(&record));
    }

    tracing::debug!(rows = rows.len(), "Query completed");
    Ok(QueryResponse::new(columns, rows))
}

pub async fn get_schema(graph: &dyn GraphConnection) -> Result<SchemaResponse, ToolError> {
    let mut cursor = graph.run(SCHEMA_QUERY).await.map_err(ToolError::Schema)?;

    let mut schema = Vec::new();
    while let Some(record) = cursor.next().await.map_err(ToolError::SchemaResults)? {
        schema.push(raw_row(&record));
    }

    if schema.is_empty() {
        Ok(SchemaResponse::Empty)
    } else {
        Ok(SchemaResponse::Schema(schema))
    }
}

fn reshaped_row(record: &Record) -> ResultRow {
    record
        .iter()
        .map(|(key, value)| (key.to_string(), value.reshape()))
        .collect()
}

fn raw_row(record: &Record) -> ResultRow {
    record
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_json()))
        .collect()
}
