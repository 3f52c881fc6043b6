//! Field and key rewriting for a single node
//!
//! Neither function descends; the [`Walker`](crate::Walker) decides which
//! nodes are visited.

use scav_graph::{Key, Mapping, NodeRef, Record};

use crate::identifiers::IdentifierSet;
use crate::names::{is_spawn_container, SPAWN_FIELD_NAMES};

/// Rewrite spawn-type fields of a record in place
///
/// For each well-known field name the record declares and can read, the
/// current value's text is compared with `ids`; on a match the target is
/// converted to the field's native representation and written back.
/// Fields whose representation cannot hold the target (unknown enum
/// symbol, unsupported type) and failed reads or writes are skipped, as
/// are fields already holding the converted target.
///
/// Returns the number of fields written.
pub fn rewrite_fields(record: &mut dyn Record, ids: &IdentifierSet) -> usize {
    let mut replaced = 0;

    for name in SPAWN_FIELD_NAMES {
        let Some(field) = record.field(name) else {
            continue;
        };
        if !field.is_readable() {
            continue;
        }
        let field = field.clone();

        let current = match record.get(&field.name) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!("skipping {}.{}: {}", record.type_name(), field.name, err);
                continue;
            }
        };
        let Some(text) = current.text() else {
            continue;
        };
        if !ids.matches(&text) {
            continue;
        }

        let Some(assignment) = field.repr.coerce(ids.to()) else {
            tracing::trace!(
                "{}.{} cannot hold '{}' as {:?}",
                record.type_name(),
                field.name,
                ids.to(),
                field.repr
            );
            continue;
        };
        if assignment == current || !field.is_writable() {
            continue;
        }

        match record.set(&field.name, assignment) {
            Ok(()) => replaced += 1,
            Err(err) => {
                tracing::trace!("write to {}.{} failed: {}", record.type_name(), field.name, err);
            }
        }
    }

    replaced
}

/// Rewrite spawn-type keys of a mapping node in place
///
/// A text key matching `ids` is rewritten only if `context` names a
/// spawn-keyed container or the entry's value is a record exposing a
/// spawn-type field. When the target key already exists, the existing
/// entry wins and the matching entry is dropped; otherwise the entry is
/// renamed at its current position. Nodes other than mappings are left
/// alone.
///
/// Entry values are inspected while `node` is unlocked.
///
/// Returns the number of keys changed.
pub fn rewrite_keys(node: &NodeRef, context: &str, ids: &IdentifierSet) -> usize {
    let keyed_container = is_spawn_container(context);

    let candidates: Vec<(Key, Option<NodeRef>)> = {
        let guard = node.read();
        let Some(map) = guard.as_mapping() else {
            return 0;
        };
        map.iter()
            .filter(|(key, _)| key.as_text().is_some_and(|text| ids.matches(text)))
            .filter_map(|(key, value)| {
                if keyed_container {
                    Some((key.clone(), None))
                } else {
                    value.as_node().map(|child| (key.clone(), Some(child.clone())))
                }
            })
            .collect()
    };

    let matching: Vec<Key> = candidates
        .into_iter()
        .filter(|(_, child)| match child {
            Some(child) => exposes_spawn_fields(child),
            None => true,
        })
        .map(|(key, _)| key)
        .collect();
    if matching.is_empty() {
        return 0;
    }

    let mut guard = node.write();
    match guard.as_mapping_mut() {
        Some(map) => rename_keys(map, matching, ids.to()),
        None => 0,
    }
}

/// Rename `keys` to `to`; an existing `to` entry wins
fn rename_keys(map: &mut Mapping, keys: Vec<Key>, to: &str) -> usize {
    let target = Key::Text(to.to_string());
    let mut replaced = 0;
    for old in keys {
        if map.contains_key(&target) {
            if map.shift_remove(&old).is_some() {
                replaced += 1;
            }
        } else if let Some((index, _, value)) = map.shift_remove_full(&old) {
            map.shift_insert(index, target.clone(), value);
            replaced += 1;
        }
    }
    replaced
}

/// Check if a node is a record declaring a readable spawn-type field
fn exposes_spawn_fields(node: &NodeRef) -> bool {
    node.read()
        .as_record()
        .is_some_and(|record| record.exposes_any(SPAWN_FIELD_NAMES))
}
