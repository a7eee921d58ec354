//! Bolt connection to Memgraph via `neo4rs`

use std::collections::BTreeMap;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::stream::{Stream, TryStreamExt};
use neo4rs::{
    query, BoltMap, BoltNode, BoltPath, BoltRelation, BoltType, BoltUnboundedRelation,
    ConfigBuilder, Graph, Row,
};
use serde_json::{json, Value};

use super::value::{NodeValue, PathRelationship, PathValue, Properties, RelationshipValue};
use super::{GraphConnection, GraphError, GraphValue, Record, RecordCursor};
use crate::config::{Auth, ConnectionConfig};

const CONNECTIVITY_QUERY: &str = "RETURN 1";

type Rows = Pin<Box<dyn Stream<Item = Result<Row, neo4rs::Error>> + Send>>;

/// Process-wide driver handle
pub struct MemgraphConnection {
    graph: Graph,
    uri: String,
}

impl MemgraphConnection {
    /// Build the driver and verify the server answers
    ///
    /// Memgraph without authentication accepts empty credentials, which is
    /// what the driver sends for [`Auth::None`].
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, GraphError> {
        let uri = config.uri.clone();
        let (user, password) = match config.auth() {
            Auth::None => {
                tracing::info!(%uri, "Connecting to Memgraph without authentication");
                (String::new(), String::new())
            }
            Auth::Basic { username, password } => {
                tracing::info!(%uri, %username, "Connecting to Memgraph with basic auth");
                (username, password)
            }
        };

        let driver_config = ConfigBuilder::default()
            .uri(uri.as_str())
            .user(user)
            .password(password)
            .build()
            .map_err(|source| GraphError::Driver {
                uri: uri.clone(),
                source,
            })?;

        let graph = Graph::connect(driver_config)
            .await
            .map_err(|source| GraphError::Driver {
                uri: uri.clone(),
                source,
            })?;

        let connection = Self { graph, uri };
        connection.verify_connectivity().await?;
        Ok(connection)
    }

    /// Round-trip a trivial query through a fresh session
    async fn verify_connectivity(&self) -> Result<(), GraphError> {
        let connectivity = |source| GraphError::Connectivity {
            uri: self.uri.clone(),
            source,
        };

        let mut rows = self
            .graph
            .execute(query(CONNECTIVITY_QUERY))
            .await
            .map_err(connectivity)?;
        while rows.next().await.map_err(connectivity)?.is_some() {}
        Ok(())
    }
}

#[async_trait]
impl GraphConnection for MemgraphConnection {
    async fn run(&self, cypher: &str) -> Result<Box<dyn RecordCursor>, GraphError> {
        let rows = self.graph.execute(query(cypher)).await?.into_stream();
        Ok(Box::new(MemgraphCursor {
            rows: Box::pin(rows.into_stream()),
        }))
    }
}

/// Rows of one query; the pooled connection returns to the driver on drop
struct MemgraphCursor {
    rows: Rows,
}

#[async_trait]
impl RecordCursor for MemgraphCursor {
    async fn next(&mut self) -> Result<Option<Record>, GraphError> {
        match self.rows.try_next().await? {
            Some(row) => decode_row(&row).map(Some),
            None => Ok(None),
        }
    }
}

// Bolt rows are keyed maps without field order, so columns are sorted to
// keep output stable between calls.
fn decode_row(row: &Row) -> Result<Record, GraphError> {
    let columns: BoltMap = row.to_strict()?;
    let columns: BTreeMap<String, BoltType> = columns
        .value
        .into_iter()
        .map(|(key, value)| (key.value, value))
        .collect();

    let mut fields = Vec::with_capacity(columns.len());
    for (column, value) in columns {
        match decode_value(&value) {
            Ok(value) => fields.push((column, value)),
            Err(message) => return Err(GraphError::Decode { column, message }),
        }
    }
    Ok(Record::new(fields))
}

fn decode_value(value: &BoltType) -> Result<GraphValue, String> {
    let decoded = match value {
        BoltType::Null(_) => GraphValue::Scalar(Value::Null),
        BoltType::Boolean(b) => GraphValue::Scalar(Value::Bool(b.value)),
        BoltType::Integer(i) => GraphValue::Scalar(Value::from(i.value)),
        BoltType::Float(f) => GraphValue::Scalar(Value::from(f.value)),
        BoltType::String(s) => GraphValue::Scalar(Value::String(s.value.clone())),
        BoltType::Bytes(b) => GraphValue::Other(Value::from(b.value.to_vec())),
        BoltType::List(list) => GraphValue::List(
            list.value
                .iter()
                .map(decode_value)
                .collect::<Result<_, _>>()?,
        ),
        BoltType::Map(map) => {
            let mut entries = BTreeMap::new();
            for (key, value) in &map.value {
                entries.insert(key.value.clone(), decode_value(value)?);
            }
            GraphValue::Map(entries)
        }
        BoltType::Node(node) => GraphValue::Node(node_value(node)?),
        BoltType::Relation(rel) => GraphValue::Relationship(relationship_value(rel)?),
        BoltType::UnboundedRelation(rel) => {
            let rel = path_relationship(rel)?;
            GraphValue::Other(json!({
                "id": rel.id,
                "type": rel.rel_type,
                "properties": rel.properties,
            }))
        }
        BoltType::Path(path) => GraphValue::Path(path_value(path)?),
        BoltType::Point2D(p) => GraphValue::Other(json!({
            "srid": p.sr_id.value,
            "x": p.x.value,
            "y": p.y.value,
        })),
        BoltType::Point3D(p) => GraphValue::Other(json!({
            "srid": p.sr_id.value,
            "x": p.x.value,
            "y": p.y.value,
            "z": p.z.value,
        })),
        BoltType::Duration(d) => {
            let duration = std::time::Duration::from(d.clone());
            GraphValue::Other(Value::String(format!("{:?}", duration)))
        }
        BoltType::Date(d) => {
            let date = NaiveDate::try_from(d).map_err(|e| e.to_string())?;
            GraphValue::Other(Value::String(date.to_string()))
        }
        BoltType::Time(t) => {
            let (time, offset) = <(NaiveTime, FixedOffset)>::from(t);
            GraphValue::Other(Value::String(format!("{}{}", time, offset)))
        }
        BoltType::LocalTime(t) => GraphValue::Other(Value::String(NaiveTime::from(t).to_string())),
        BoltType::DateTime(dt) => {
            let datetime = DateTime::<FixedOffset>::try_from(dt).map_err(|e| e.to_string())?;
            GraphValue::Other(Value::String(datetime.to_rfc3339()))
        }
        BoltType::LocalDateTime(dt) => {
            let datetime = NaiveDateTime::try_from(dt).map_err(|e| e.to_string())?;
            GraphValue::Other(Value::String(datetime.to_string()))
        }
        BoltType::DateTimeZoneId(dt) => {
            let datetime = DateTime::<FixedOffset>::try_from(dt).map_err(|e| e.to_string())?;
            GraphValue::Other(Value::String(format!(
                "{}[{}]",
                datetime.to_rfc3339(),
                dt.tz_id()
            )))
        }
    };
    Ok(decoded)
}

fn properties(map: &BoltMap) -> Result<Properties, String> {
    let mut properties = Properties::new();
    for (key, value) in &map.value {
        properties.insert(key.value.clone(), decode_value(value)?.to_json());
    }
    Ok(properties)
}

fn node_value(node: &BoltNode) -> Result<NodeValue, String> {
    Ok(NodeValue {
        id: node.id.value.to_string(),
        labels: node
            .labels
            .iter()
            .filter_map(|label| match label {
                BoltType::String(s) => Some(s.value.clone()),
                _ => None,
            })
            .collect(),
        properties: properties(&node.properties)?,
    })
}

fn relationship_value(rel: &BoltRelation) -> Result<RelationshipValue, String> {
    Ok(RelationshipValue {
        id: rel.id.value.to_string(),
        rel_type: rel.typ.value.clone(),
        start: rel.start_node_id.value.to_string(),
        end: rel.end_node_id.value.to_string(),
        properties: properties(&rel.properties)?,
    })
}

fn path_relationship(rel: &BoltUnboundedRelation) -> Result<PathRelationship, String> {
    Ok(PathRelationship {
        id: rel.id.value.to_string(),
        rel_type: rel.typ.value.clone(),
        properties: properties(&rel.properties)?,
    })
}

fn path_value(path: &BoltPath) -> Result<PathValue, String> {
    Ok(PathValue {
        nodes: path
            .nodes()
            .iter()
            .map(node_value)
            .collect::<Result<_, _>>()?,
        relationships: path
            .rels()
            .iter()
            .map(path_relationship)
            .collect::<Result<_, _>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo4rs::{BoltFloat, BoltInteger, BoltList, BoltPoint2D, BoltString};

    fn row(columns: Vec<(&str, BoltType)>) -> Row {
        let (fields, data): (Vec<BoltType>, Vec<BoltType>) = columns
            .into_iter()
            .map(|(name, value)| (BoltType::from(name), value))
            .unzip();
        Row::new(BoltList::from(fields), BoltList::from(data))
    }

    fn bolt_map(entries: Vec<(&str, BoltType)>) -> BoltMap {
        entries
            .into_iter()
            .map(|(key, value)| (BoltString::from(key), value))
            .collect()
    }

    fn person(id: i64, name: &str) -> BoltNode {
        BoltNode::new(
            BoltInteger::new(id),
            BoltList::from(vec![BoltType::from("Person")]),
            bolt_map(vec![("name", BoltType::from(name))]),
        )
    }

    fn knows(id: i64) -> BoltUnboundedRelation {
        BoltUnboundedRelation::new(
            BoltInteger::new(id),
            BoltString::from("KNOWS"),
            bolt_map(vec![("since", BoltType::from(2020_i64))]),
        )
    }

    fn fields(record: &Record) -> Vec<(String, Value)> {
        record
            .iter()
            .map(|(key, value)| (key.to_string(), value.reshape()))
            .collect()
    }

    #[test]
    fn test_decode_row_sorts_columns() {
        let record = decode_row(&row(vec![
            ("score", BoltType::from(0.5)),
            ("active", BoltType::from(true)),
            ("name", BoltType::from("Alice")),
            ("missing", BoltType::Null(neo4rs::BoltNull)),
        ]))
        .unwrap();

        assert_eq!(record.keys(), vec!["active", "missing", "name", "score"]);
        assert_eq!(
            fields(&record),
            vec![
                ("active".to_string(), json!(true)),
                ("missing".to_string(), json!(null)),
                ("name".to_string(), json!("Alice")),
                ("score".to_string(), json!(0.5)),
            ]
        );
    }

    #[test]
    fn test_decode_node() {
        let record = decode_row(&row(vec![("n", BoltType::Node(person(1, "Alice")))])).unwrap();
        assert_eq!(
            fields(&record)[0].1,
            json!({
                "id": "1",
                "labels": ["Person"],
                "properties": { "name": "Alice" },
            })
        );
    }

    #[test]
    fn test_decode_relationship() {
        let rel = BoltRelation {
            id: BoltInteger::new(7),
            start_node_id: BoltInteger::new(1),
            end_node_id: BoltInteger::new(2),
            typ: BoltString::from("KNOWS"),
            properties: bolt_map(vec![("since", BoltType::from(2020_i64))]),
        };
        let record = decode_row(&row(vec![("r", BoltType::Relation(rel))])).unwrap();
        assert_eq!(
            fields(&record)[0].1,
            json!({
                "id": "7",
                "type": "KNOWS",
                "start": "1",
                "end": "2",
                "properties": { "since": 2020 },
            })
        );
    }

    #[test]
    fn test_decode_path() {
        let path = BoltPath {
            nodes: BoltList::from(vec![
                BoltType::Node(person(1, "Alice")),
                BoltType::Node(person(2, "Bob")),
            ]),
            rels: BoltList::from(vec![BoltType::UnboundedRelation(knows(7))]),
            indices: BoltList::from(vec![BoltType::from(1_i64), BoltType::from(1_i64)]),
        };
        let record = decode_row(&row(vec![("p", BoltType::Path(path))])).unwrap();

        let (_, value) = record.iter().next().unwrap();
        assert_eq!(value.reshape(), json!({ "nodes": 2, "relationships": 1 }));
        let raw = value.to_json();
        assert_eq!(raw["nodes"][1]["properties"]["name"], "Bob");
        assert_eq!(raw["relationships"][0]["type"], "KNOWS");
    }

    #[test]
    fn test_decode_nodes_nested_in_list_and_map() {
        let friends = BoltType::List(BoltList::from(vec![
            BoltType::Node(person(1, "Alice")),
            BoltType::Node(person(2, "Bob")),
        ]));
        let summary = BoltType::Map(bolt_map(vec![
            ("leader", BoltType::Node(person(1, "Alice"))),
            ("size", BoltType::from(2_i64)),
        ]));
        let record = decode_row(&row(vec![("friends", friends), ("summary", summary)])).unwrap();
        let fields = fields(&record);

        assert_eq!(fields[0].1[1]["id"], "2");
        assert_eq!(fields[0].1[1]["labels"], json!(["Person"]));
        assert_eq!(fields[1].1["leader"]["id"], "1");
        assert_eq!(fields[1].1["leader"]["properties"]["name"], "Alice");
        assert_eq!(fields[1].1["size"], 2);
    }

    #[test]
    fn test_decode_scalar_list() {
        let list = BoltType::from(vec![1_i64, 2, 3]);
        let record = decode_row(&row(vec![("xs", list)])).unwrap();
        assert_eq!(fields(&record)[0].1, json!([1, 2, 3]));
    }

    #[test]
    fn test_decode_temporal_values_as_text() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let record = decode_row(&row(vec![
            ("date", BoltType::from(date)),
            ("local_time", BoltType::from(time)),
            ("local_datetime", BoltType::from(date.and_time(time))),
            ("duration", BoltType::from(std::time::Duration::from_secs(90))),
        ]))
        .unwrap();

        assert_eq!(
            fields(&record),
            vec![
                ("date".to_string(), json!("2024-01-15")),
                ("duration".to_string(), json!("90s")),
                ("local_datetime".to_string(), json!("2024-01-15 09:30:00")),
                ("local_time".to_string(), json!("09:30:00")),
            ]
        );
    }

    #[test]
    fn test_decode_datetime_with_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap();
        let record = decode_row(&row(vec![("at", BoltType::from(datetime))])).unwrap();
        assert_eq!(fields(&record)[0].1, json!("2024-01-15T09:30:00+02:00"));
    }

    #[test]
    fn test_decode_point() {
        let point = BoltPoint2D {
            sr_id: BoltInteger::new(7203),
            x: BoltFloat::new(1.5),
            y: BoltFloat::new(-2.0),
        };
        let record = decode_row(&row(vec![("loc", BoltType::Point2D(point))])).unwrap();
        assert_eq!(
            fields(&record)[0].1,
            json!({ "srid": 7203, "x": 1.5, "y": -2.0 })
        );
    }

    #[test]
    fn test_decode_empty_row() {
        let record = decode_row(&row(vec![])).unwrap();
        assert!(record.keys().is_empty());
    }
}
