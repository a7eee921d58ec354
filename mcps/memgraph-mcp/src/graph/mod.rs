//! Graph database access
//!
//! The server talks to the database only through [`GraphConnection`]. One
//! connection lives for the whole process; every `run` call is its own
//! short-lived session whose resources are released when the returned
//! cursor is dropped, whether or not it was read to the end.

mod memgraph;
mod value;

use async_trait::async_trait;

pub use memgraph::MemgraphConnection;
pub use value::{GraphValue, NodeValue, PathRelationship, PathValue, Properties, RelationshipValue};

/// Errors raised by the connection or while reading results
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to create driver for {uri}: {source}")]
    Driver {
        uri: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("failed to connect to Memgraph at {uri}: {source}")]
    Connectivity {
        uri: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error(transparent)]
    Bolt(#[from] neo4rs::Error),

    /// Database-reported failure that did not come through the Bolt driver
    #[error("{0}")]
    Query(String),

    #[error("cannot read result row: {0}")]
    Row(#[from] neo4rs::DeError),

    #[error("cannot decode column '{column}': {message}")]
    Decode { column: String, message: String },
}

/// One result record: column names paired with values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, GraphValue)>,
}

impl Record {
    pub fn new(fields: Vec<(String, GraphValue)>) -> Self {
        Self { fields }
    }

    pub fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GraphValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, GraphValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, GraphValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Stream of records produced by one query
#[async_trait]
pub trait RecordCursor: Send {
    /// Next record, `Ok(None)` once the stream is exhausted
    async fn next(&mut self) -> Result<Option<Record>, GraphError>;
}

/// Long-lived handle to the database
#[async_trait]
pub trait GraphConnection: Send + Sync {
    /// Run `cypher` with no bound parameters in a fresh session
    async fn run(&self, cypher: &str) -> Result<Box<dyn RecordCursor>, GraphError>;
}
