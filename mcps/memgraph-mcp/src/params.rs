//! Parameter types for Memgraph MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Arguments of `run_query`
///
/// A missing or non-string `query` decodes to `None`; a non-boolean
/// `unsafe` decodes to `false`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(extend("required" = ["query"]))]
pub struct RunQueryParams {
    #[schemars(with = "String", description = "The Cypher query to execute")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub query: Option<String>,

    #[schemars(description = "Set to true to allow potentially unsafe queries (use with caution)")]
    #[serde(rename = "unsafe", default, deserialize_with = "bool_or_false")]
    pub allow_unsafe: bool,
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

impl RunQueryParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            allow_unsafe: false,
        }
    }

    pub fn allow_unsafe(mut self) -> Self {
        self.allow_unsafe = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe_defaults_to_false() {
        let params: RunQueryParams =
            serde_json::from_value(serde_json::json!({ "query": "MATCH (n) RETURN n" })).unwrap();
        assert_eq!(params.query.as_deref(), Some("MATCH (n) RETURN n"));
        assert!(!params.allow_unsafe);
    }

    #[test]
    fn test_unsafe_field_name() {
        let params: RunQueryParams = serde_json::from_value(serde_json::json!({
            "query": "CREATE (n)",
            "unsafe": true,
        }))
        .unwrap();
        assert!(params.allow_unsafe);
    }

    #[test]
    fn test_missing_query_decodes_to_none() {
        let params: RunQueryParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.query.is_none());
    }

    #[test]
    fn test_non_string_query_decodes_to_none() {
        for query in [serde_json::json!(42), serde_json::json!(null), serde_json::json!(["MATCH"])] {
            let params: RunQueryParams =
                serde_json::from_value(serde_json::json!({ "query": query })).unwrap();
            assert!(params.query.is_none());
        }
    }

    #[test]
    fn test_non_bool_unsafe_is_false() {
        for flag in [serde_json::json!("true"), serde_json::json!(1), serde_json::json!(null)] {
            let params: RunQueryParams = serde_json::from_value(serde_json::json!({
                "query": "CREATE (n)",
                "unsafe": flag,
            }))
            .unwrap();
            assert!(!params.allow_unsafe);
        }
    }

    #[test]
    fn test_schema_declares_field_types() {
        let schema = schemars::schema_for!(RunQueryParams);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["properties"]["query"]["type"], "string");
        assert_eq!(json["properties"]["unsafe"]["type"], "boolean");
    }

    #[test]
    fn test_schema_marks_query_required() {
        let schema = schemars::schema_for!(RunQueryParams);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["required"], serde_json::json!(["query"]));
        assert!(json["properties"].get("unsafe").is_some());
    }
}
