//! Structural walker
//!
//! Visits every node reachable from a starting value exactly once, rewriting
//! fields and keys as it goes. The walker never holds a node's lock while
//! locking another node, so cycles and shared sub-objects cannot deadlock
//! it; the [`VisitedSet`] keeps them from being processed twice. Pending
//! nodes live on an explicit stack, so nesting depth is bounded only by
//! memory.

use scav_graph::{Node, NodeRef, Record, Value, VisitedSet};

use crate::identifiers::IdentifierSet;
use crate::rewriter::{rewrite_fields, rewrite_keys};

/// Cycle-safe deep traversal
///
/// A walker owns the visited set for one top-level invocation. Create a new
/// walker (or use [`deep_patch`]) for each independent pass.
#[derive(Debug)]
pub struct Walker<'a> {
    ids: &'a IdentifierSet,
    rewrite_keys: bool,
    visited: VisitedSet,
}

impl<'a> Walker<'a> {
    /// Create walker with an empty visited set
    #[inline]
    #[must_use]
    pub fn new(ids: &'a IdentifierSet, rewrite_keys: bool) -> Self {
        Self {
            ids,
            rewrite_keys,
            visited: VisitedSet::new(),
        }
    }

    /// Nodes visited so far
    #[inline]
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Walk a value and everything reachable from it
    ///
    /// `context` names the container the value was reached through; it
    /// decides whether mapping keys are treated as spawn-type identifiers.
    /// Scalars are ignored, already visited nodes are skipped.
    ///
    /// Returns the number of fields and keys rewritten.
    pub fn walk(&mut self, value: &Value, context: &str) -> usize {
        let Value::Node(node) = value else {
            return 0;
        };
        self.walk_node(node, context)
    }

    fn walk_node(&mut self, start: &NodeRef, context: &str) -> usize {
        let mut replaced = 0;
        let mut pending = vec![(context.to_string(), start.clone())];

        while let Some((context, node)) = pending.pop() {
            if !self.visited.insert(&node) {
                continue;
            }
            if self.rewrite_keys {
                replaced += rewrite_keys(&node, &context, self.ids);
            }

            let children = {
                let mut guard = node.write();
                match &mut *guard {
                    Node::Record(record) => {
                        replaced += rewrite_fields(&mut **record, self.ids);
                        record_children(&**record)
                    }
                    Node::Mapping(map) => nested(map.values(), &context),
                    Node::Sequence(items) => nested(items.iter(), &context),
                }
            };
            // Reversed so children are visited in declaration order.
            pending.extend(children.into_iter().rev());
        }
        replaced
    }
}

/// Walk a value with a fresh visited set
///
/// Returns the number of fields and keys rewritten.
pub fn deep_patch(value: &Value, context: &str, ids: &IdentifierSet, rewrite_keys: bool) -> usize {
    Walker::new(ids, rewrite_keys).walk(value, context)
}

/// Node-valued members of a mapping or sequence, reached under `context`
fn nested<'v>(values: impl Iterator<Item = &'v Value>, context: &str) -> Vec<(String, NodeRef)> {
    values
        .filter_map(Value::as_node)
        .map(|child| (context.to_string(), child.clone()))
        .collect()
}

/// Node-valued readable fields of a record, each reached under its field name
fn record_children(record: &dyn Record) -> Vec<(String, NodeRef)> {
    let mut children = Vec::new();
    for field in record.fields() {
        if !field.is_readable() {
            continue;
        }
        match record.get(&field.name) {
            Ok(Value::Node(child)) => children.push((field.name.to_string(), child)),
            Ok(_) => {}
            Err(err) => {
                tracing::trace!("skipping {}.{}: {}", record.type_name(), field.name, err);
            }
        }
    }
    children
}
