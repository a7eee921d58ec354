//! Values returned by the graph database
//!
//! Driver values are mapped onto [`GraphValue`] once, at the connection
//! boundary. Handlers then either reshape them into the compact result form
//! ([`GraphValue::reshape`]) or serialize them as-is (the `Serialize` impl).

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Property map of a node or relationship
pub type Properties = Map<String, Value>;

/// A single value in a result record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphValue {
    /// Null, booleans, numbers, and strings
    Scalar(Value),
    List(Vec<GraphValue>),
    Map(BTreeMap<String, GraphValue>),
    Node(NodeValue),
    Relationship(RelationshipValue),
    Path(PathValue),
    /// Any other driver-native value (temporal, spatial, bytes), passed
    /// through in the best textual form the driver offers
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeValue {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipValue {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start: String,
    pub end: String,
    pub properties: Properties,
}

/// A relationship inside a path; endpoints are implied by its position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRelationship {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathValue {
    pub nodes: Vec<NodeValue>,
    pub relationships: Vec<PathRelationship>,
}

impl GraphValue {
    /// Compact result form used by `run_query`
    ///
    /// Nodes become `{id, labels, properties}`, relationships
    /// `{id, type, start, end, properties}`, and paths only report how many
    /// nodes and relationships they contain. Lists and maps are reshaped
    /// element by element.
    pub fn reshape(&self) -> Value {
        match self {
            GraphValue::Scalar(v) | GraphValue::Other(v) => v.clone(),
            GraphValue::List(items) => Value::Array(items.iter().map(GraphValue::reshape).collect()),
            GraphValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.reshape()))
                    .collect(),
            ),
            GraphValue::Node(node) => json!({
                "id": node.id,
                "labels": node.labels,
                "properties": node.properties,
            }),
            GraphValue::Relationship(rel) => json!({
                "id": rel.id,
                "type": rel.rel_type,
                "start": rel.start,
                "end": rel.end,
                "properties": rel.properties,
            }),
            GraphValue::Path(path) => json!({
                "nodes": path.nodes.len(),
                "relationships": path.relationships.len(),
            }),
        }
    }

    /// Full structural form, without reshaping
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Value> for GraphValue {
    fn from(value: Value) -> Self {
        GraphValue::Scalar(value)
    }
}
