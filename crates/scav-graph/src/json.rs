//! JSON adapters
//!
//! Converts between `serde_json` trees and graph values. Objects become
//! mappings with text keys; records are written as objects in field order.

use serde_json::{Map, Number, Value as Json};

use crate::error::GraphError;
use crate::node::{Mapping, Node, NodeId, NodeRef};
use crate::value::{Key, Value};

/// Convert a JSON tree into an untyped graph
///
/// Every object and array becomes its own node, so the result has no
/// aliasing.
#[must_use]
pub fn from_untyped(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number_to_value(n),
        Json::String(s) => Value::Text(s.clone()),
        Json::Array(items) => Value::Node(NodeRef::sequence(
            items.iter().map(from_untyped).collect(),
        )),
        Json::Object(obj) => {
            let map: Mapping = obj
                .iter()
                .map(|(key, value)| (Key::Text(key.clone()), from_untyped(value)))
                .collect();
            Value::Node(NodeRef::mapping(map))
        }
    }
}

/// Convert a JSON number, preferring integers
#[must_use]
pub fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

/// Convert a graph value into a JSON tree
///
/// Shared nodes are written once per path that reaches them. Record fields
/// that cannot be read are omitted.
///
/// # Errors
/// Returns error if a node is its own ancestor or a float is not finite
pub fn to_json(value: &Value) -> Result<Json, GraphError> {
    let mut ancestors = Vec::new();
    write_value(value, &mut ancestors)
}

fn write_value(value: &Value, ancestors: &mut Vec<NodeId>) -> Result<Json, GraphError> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number((*i).into()),
        Value::UInt(u) => Json::Number((*u).into()),
        Value::Float(x) => Json::Number(Number::from_f64(*x).ok_or(GraphError::NonFiniteFloat(*x))?),
        Value::Text(s) => Json::String(s.clone()),
        Value::Symbol(sym) => Json::String(sym.name().to_string()),
        Value::Node(node) => write_node(node, ancestors)?,
    })
}

fn write_node(node: &NodeRef, ancestors: &mut Vec<NodeId>) -> Result<Json, GraphError> {
    let id = node.id();
    if ancestors.contains(&id) {
        return Err(GraphError::Cycle(id));
    }

    // Snapshot the children first; no lock is held while descending.
    let (is_sequence, children): (bool, Vec<(String, Value)>) = match &*node.read() {
        Node::Mapping(map) => (
            false,
            map.iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        ),
        Node::Sequence(items) => (
            true,
            items.iter().map(|item| (String::new(), item.clone())).collect(),
        ),
        Node::Record(record) => (
            false,
            record
                .fields()
                .iter()
                .filter(|field| field.is_readable())
                .filter_map(|field| {
                    record
                        .get(&field.name)
                        .ok()
                        .map(|value| (field.name.to_string(), value))
                })
                .collect(),
        ),
    };

    ancestors.push(id);
    let result = if is_sequence {
        children
            .iter()
            .map(|(_, value)| write_value(value, ancestors))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array)
    } else {
        let mut obj = Map::new();
        for (key, value) in &children {
            obj.insert(key.clone(), write_value(value, ancestors)?);
        }
        Ok(Json::Object(obj))
    };
    ancestors.pop();
    result
}
