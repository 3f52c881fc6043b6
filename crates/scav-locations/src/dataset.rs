//! Schema-driven loading and export of the location database

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use scav_graph::json::{from_untyped, to_json};
use scav_graph::{DynRecord, FieldInfo, FieldRepr, GraphError, NodeRef, Value};
use serde_json::{Map, Value as Json};

use crate::schema::{RecordSchema, Shape, LOCATIONS, UNTYPED};

/// Errors while loading or exporting a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Document root is not an object
    #[error("{path}: expected a JSON object")]
    NotAnObject {
        /// Location in the document
        path: String,
    },

    /// Value does not have the declared structure
    #[error("{path}: expected {expected}, found {found}")]
    Shape {
        /// Location in the document
        path: String,
        /// Declared structure
        expected: &'static str,
        /// JSON type found
        found: &'static str,
    },

    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Graph could not be exported
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A loaded location database
///
/// The root is a `Locations` record with one member per map. Declared
/// members keep their native representation (spawn types load as
/// `WildSpawnType` symbols); everything else loads untyped and is exported
/// unchanged.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: NodeRef,
}

impl Dataset {
    /// Load from a parsed JSON document
    ///
    /// Member names are matched against the schema ignoring case; the
    /// document's spelling is kept. Spawn-type strings that are not symbols
    /// of the enumeration load as plain text.
    ///
    /// # Errors
    /// Returns error if the root is not an object or a declared member has
    /// the wrong structure
    pub fn from_json(json: &Json) -> Result<Self, DatasetError> {
        let Json::Object(obj) = json else {
            return Err(DatasetError::NotAnObject { path: "$".into() });
        };
        Ok(Self {
            root: load_record(obj, &LOCATIONS, "$")?,
        })
    }

    /// Load from a reader
    ///
    /// # Errors
    /// Returns error if the input is not valid JSON or does not match the
    /// schema
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let json: Json = serde_json::from_reader(reader)?;
        Self::from_json(&json)
    }

    /// Load from a file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or its content does not load
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Root record
    #[inline]
    #[must_use]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Names of the map members, in document order
    ///
    /// Administrative members declared by the root schema are not maps.
    #[must_use]
    pub fn map_names(&self) -> Vec<String> {
        let guard = self.root.read();
        let Some(record) = guard.as_record() else {
            return Vec::new();
        };
        record
            .fields()
            .iter()
            .filter(|field| LOCATIONS.field(&field.name).is_none())
            .map(|field| field.name.to_string())
            .collect()
    }

    /// Look up a map by name, ignoring case
    #[must_use]
    pub fn location(&self, name: &str) -> Option<NodeRef> {
        if LOCATIONS.field(name).is_some() {
            return None;
        }
        match self.root.read().member(name)? {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Export to a JSON document
    ///
    /// # Errors
    /// Returns error if the graph contains a cycle or a non-finite number
    pub fn to_json(&self) -> Result<Json, DatasetError> {
        Ok(to_json(&Value::Node(self.root.clone()))?)
    }

    /// Export as pretty-printed JSON text
    ///
    /// # Errors
    /// Returns error if the graph cannot be exported
    pub fn to_string_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(&self.to_json()?)?)
    }

    /// Write pretty-printed JSON to a file
    ///
    /// # Errors
    /// Returns error if the graph cannot be exported or the file cannot be
    /// written
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let text = self.to_string_pretty()?;
        fs::write(path, text).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for Dataset {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let json: Json = serde_json::from_str(s)?;
        Self::from_json(&json)
    }
}

fn load_record(
    obj: &Map<String, Json>,
    schema: &'static RecordSchema,
    path: &str,
) -> Result<NodeRef, DatasetError> {
    let mut record = DynRecord::new(schema.type_name);
    for (key, json) in obj {
        let (repr, shape) = match schema.field(key) {
            Some(spec) => (spec.repr, spec.shape),
            None => (FieldRepr::Dynamic, schema.rest.unwrap_or(&UNTYPED)),
        };
        let value = load_value(json, repr, shape, &format!("{path}.{key}"))?;
        record.push_field(FieldInfo::new(key.clone(), repr), value);
    }
    Ok(NodeRef::record(record))
}

fn load_value(json: &Json, repr: FieldRepr, shape: &'static Shape, path: &str) -> Result<Value, DatasetError> {
    match (shape, json) {
        (Shape::Scalar, _) => Ok(load_scalar(json, repr)),
        (Shape::Untyped, _) | (Shape::Record(_) | Shape::List(_), Json::Null) => Ok(from_untyped(json)),
        (Shape::Record(schema), Json::Object(obj)) => Ok(Value::Node(load_record(obj, *schema, path)?)),
        (Shape::List(inner), Json::Array(items)) => {
            let loaded = items
                .iter()
                .enumerate()
                .map(|(i, item)| load_value(item, FieldRepr::Dynamic, *inner, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Node(NodeRef::sequence(loaded)))
        }
        (Shape::Record(schema), _) => Err(DatasetError::Shape {
            path: path.to_string(),
            expected: schema.type_name,
            found: json_kind(json),
        }),
        (Shape::List(_), _) => Err(DatasetError::Shape {
            path: path.to_string(),
            expected: "array",
            found: json_kind(json),
        }),
    }
}

fn load_scalar(json: &Json, repr: FieldRepr) -> Value {
    match (repr, json) {
        (FieldRepr::Enum(def) | FieldRepr::OptionalEnum(def), Json::String(s)) => {
            def.parse(s).map_or_else(|| Value::Text(s.clone()), Value::Symbol)
        }
        (FieldRepr::Enum(def) | FieldRepr::OptionalEnum(def), Json::Number(n)) => n
            .as_u64()
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| def.symbol(index))
            .map_or_else(|| from_untyped(json), Value::Symbol),
        _ => from_untyped(json),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WILD_SPAWN_TYPE;
    use pretty_assertions::assert_eq;
    use scav_graph::Node;
    use serde_json::json;

    fn sample() -> Json {
        json!({
            "base": {"note": "not a map"},
            "bigmap": {
                "Base": {
                    "Id": "bigmap",
                    "waves": [{"WildSpawnType": "assault", "slots_min": 1}],
                    "MinMaxBots": [{"WildSpawnType": "marksman", "min": 0}],
                    "BossLocationSpawn": [{
                        "BossName": "bossKojaniy",
                        "BossEscortType": "followerKojaniy",
                        "Supports": null
                    }],
                    "Loot": [1, 2, 3]
                }
            },
            "Woods": {"Base": {"Waves": []}}
        })
    }

    #[test]
    fn map_names_skip_administrative_members() {
        let dataset = Dataset::from_json(&sample()).unwrap();
        assert_eq!(dataset.map_names(), ["bigmap", "Woods"]);
    }

    #[test]
    fn declared_members_load_typed() {
        let dataset = Dataset::from_json(&sample()).unwrap();
        let location = dataset.location("BIGMAP").unwrap();
        let Some(Value::Node(base)) = location.read().member("base") else {
            panic!("base missing");
        };
        let Some(Value::Node(waves)) = base.read().member("Waves") else {
            panic!("waves missing");
        };
        let guard = waves.read();
        let Some(Value::Node(wave)) = guard.as_sequence().unwrap().first().cloned() else {
            panic!("wave missing");
        };
        let wave = wave.read();
        let record = wave.as_record().unwrap();
        assert_eq!(record.type_name(), "Wave");
        assert_eq!(
            record.get("WildSpawnType").unwrap(),
            Value::Symbol(WILD_SPAWN_TYPE.parse("assault").unwrap())
        );
        assert_eq!(record.get("slots_min").unwrap(), Value::Int(1));
    }

    #[test]
    fn undeclared_members_load_untyped() {
        let dataset = Dataset::from_json(&sample()).unwrap();
        let base = dataset.root().read().member("Base").unwrap();
        assert!(matches!(&*base.as_node().unwrap().read(), Node::Mapping(_)));
        assert!(dataset.location("Base").is_none());
    }

    #[test]
    fn unknown_spawn_type_loads_as_text() {
        let dataset = Dataset::from_json(&json!({
            "Woods": {"Base": {"Waves": [{"WildSpawnType": "raider"}]}}
        }))
        .unwrap();
        let out = dataset.to_json().unwrap();
        assert_eq!(out["Woods"]["Base"]["Waves"][0]["WildSpawnType"], "raider");
    }

    #[test]
    fn export_keeps_document() {
        let input = sample();
        let dataset = Dataset::from_json(&input).unwrap();
        assert_eq!(dataset.to_json().unwrap(), input);
    }

    #[test]
    fn wrong_structure_is_reported_with_path() {
        let err = Dataset::from_json(&json!({"Woods": {"Base": {"Waves": 3}}})).unwrap_err();
        assert_eq!(err.to_string(), "$.Woods.Base.Waves: expected array, found number");

        let err = Dataset::from_json(&json!({"Woods": "nope"})).unwrap_err();
        assert!(matches!(err, DatasetError::Shape { expected: "Location", .. }));

        let err = Dataset::from_json(&json!([1])).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnObject { .. }));
    }

    #[test]
    fn null_containers_are_kept() {
        let dataset = Dataset::from_json(&json!({"Woods": null})).unwrap();
        assert!(dataset.location("Woods").is_none());
        assert_eq!(dataset.map_names(), ["Woods"]);
    }

    #[test]
    fn parses_text() {
        let dataset: Dataset = r#"{"Shoreline": {"Base": {}}}"#.parse().unwrap();
        assert!(dataset.location("shoreline").is_some());
        assert!("{".parse::<Dataset>().is_err());
    }
}
