//! Nodes, shared handles and identity
//!
//! A [`NodeRef`] may be reachable from several places in one graph, and a
//! graph may contain cycles. Identity is the handle's allocation, so clones of
//! one handle compare equal no matter which path reached them.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::Record;
use crate::value::{Key, NodeKind, Value};

/// Keyed node contents, insertion ordered
pub type Mapping = IndexMap<Key, Value>;

/// Node contents
#[derive(Debug)]
pub enum Node {
    /// Keyed collection
    Mapping(Mapping),
    /// Ordered collection
    Sequence(Vec<Value>),
    /// Record with dynamically enumerable fields
    Record(Box<dyn Record>),
}

impl Node {
    /// Classification of this node
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Mapping(_) => NodeKind::Mapping,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Record(_) => NodeKind::Record,
        }
    }

    /// Mapping contents
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable mapping contents
    #[inline]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Sequence contents
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable sequence contents
    #[inline]
    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Record contents
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    /// Mutable record contents
    #[inline]
    pub fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        match self {
            Self::Record(record) => Some(record.as_mut()),
            _ => None,
        }
    }

    /// Look up a member by name, ignoring case
    ///
    /// Records are searched by field name, mappings by text key. Unreadable
    /// fields and failed reads yield `None`.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<Value> {
        match self {
            Self::Record(record) => {
                let field = record.field(name)?;
                if !field.is_readable() {
                    return None;
                }
                record.get(&field.name).ok()
            }
            Self::Mapping(map) => map
                .iter()
                .find(|(key, _)| key.as_text().is_some_and(|k| k.eq_ignore_ascii_case(name)))
                .map(|(_, value)| value.clone()),
            Self::Sequence(_) => None,
        }
    }
}

/// Identity of a node allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Shared, lockable handle to a [`Node`]
///
/// Cloning a handle shares the node. Locks are held only as long as a guard
/// lives; callers must not hold a guard on one node while locking another
/// node that may be the same allocation.
#[derive(Clone)]
pub struct NodeRef(Arc<RwLock<Node>>);

impl NodeRef {
    /// Wrap a node in a new handle
    #[inline]
    #[must_use]
    pub fn new(node: Node) -> Self {
        Self(Arc::new(RwLock::new(node)))
    }

    /// New mapping node
    #[inline]
    #[must_use]
    pub fn mapping(map: Mapping) -> Self {
        Self::new(Node::Mapping(map))
    }

    /// New sequence node
    #[inline]
    #[must_use]
    pub fn sequence(items: Vec<Value>) -> Self {
        Self::new(Node::Sequence(items))
    }

    /// New record node
    #[inline]
    #[must_use]
    pub fn record(record: impl Record + 'static) -> Self {
        Self::new(Node::Record(Box::new(record)))
    }

    /// Identity of this node
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.0).cast::<()>() as usize)
    }

    /// Check if two handles share one node
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Lock for reading
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Node> {
        self.0.read()
    }

    /// Lock for writing
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Node> {
        self.0.write()
    }

    /// Classification of the node
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.read().kind()
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    // Never recurses: graphs may be cyclic.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(node) => write!(f, "NodeRef({}, {:?})", self.id(), node.kind()),
            None => write!(f, "NodeRef({}, <locked>)", self.id()),
        }
    }
}

/// Identity-keyed set of visited nodes
///
/// Scoped to one traversal. The set keeps every visited node alive, so an
/// identity cannot be reused by a new allocation while the set exists.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<NodeId>,
    pinned: Vec<NodeRef>,
}

impl VisitedSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit
    ///
    /// Returns `false` if the node was already visited.
    pub fn insert(&mut self, node: &NodeRef) -> bool {
        if self.seen.insert(node.id()) {
            self.pinned.push(node.clone());
            true
        } else {
            false
        }
    }

    /// Check if a node was visited
    #[inline]
    #[must_use]
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.seen.contains(&node.id())
    }

    /// Number of distinct nodes visited
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing was visited
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dyn_record::DynRecord;
    use crate::record::FieldRepr;

    #[test]
    fn clones_share_identity() {
        let a = NodeRef::sequence(Vec::new());
        let b = a.clone();
        let c = NodeRef::sequence(Vec::new());
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn visited_set_rejects_second_visit() {
        let a = NodeRef::sequence(Vec::new());
        let mut visited = VisitedSet::new();
        assert!(visited.insert(&a));
        assert!(!visited.insert(&a.clone()));
        assert!(visited.contains(&a));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn debug_does_not_recurse_into_cycles() {
        let node = NodeRef::sequence(Vec::new());
        let inner = node.clone();
        node.write()
            .as_sequence_mut()
            .unwrap()
            .push(Value::Node(inner));
        let rendered = format!("{node:?}");
        assert!(rendered.starts_with("NodeRef(#"));
        assert!(rendered.ends_with("Sequence)"));
    }

    #[test]
    fn member_lookup_ignores_case() {
        let record = NodeRef::record(DynRecord::new("Location").with(
            "Base",
            FieldRepr::Dynamic,
            "inner",
        ));
        assert_eq!(record.read().member("base"), Some(Value::from("inner")));

        let mut map = Mapping::new();
        map.insert(Key::from("Waves"), Value::Int(1));
        let mapping = NodeRef::mapping(map);
        assert_eq!(mapping.read().member("WAVES"), Some(Value::Int(1)));
        assert_eq!(mapping.read().member("MinMaxBots"), None);
    }
}
