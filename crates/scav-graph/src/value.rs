//! Values and mapping keys

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::node::NodeRef;
use crate::symbol::Symbol;

/// Node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Opaque leaf value
    Scalar,
    /// Keyed collection
    Mapping,
    /// Ordered collection
    Sequence,
    /// Named fields
    Record,
}

/// A value held by a field, mapping entry or sequence slot
///
/// Everything except [`Value::Node`] is a scalar and is never descended into.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Plain text
    Text(String),
    /// Enumerated symbol
    Symbol(Symbol),
    /// Shared handle to a nested node
    Node(NodeRef),
}

impl Value {
    /// Check if value is a scalar (anything but a node handle)
    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Node(_))
    }

    /// Check if value is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Classification of this value
    ///
    /// Locks the node briefly for node handles.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Node(node) => node.kind(),
            _ => NodeKind::Scalar,
        }
    }

    /// Textual form used for identifier comparison
    ///
    /// `Null` and node handles have no textual form.
    #[must_use]
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null | Self::Node(_) => None,
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Int(i) => Some(Cow::Owned(i.to_string())),
            Self::UInt(u) => Some(Cow::Owned(u.to_string())),
            Self::Float(x) => Some(Cow::Owned(x.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Symbol(sym) => Some(Cow::Borrowed(sym.name())),
        }
    }

    /// Node handle, if any
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Text content, if plain text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Symbol(_) => "symbol",
            Self::Node(_) => "node",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::UInt(u), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

/// Mapping key
///
/// Only [`Key::Text`] keys take part in identifier rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Text key
    Text(String),
    /// Integer key
    Int(i64),
    /// Enumerated key
    Symbol(Symbol),
}

impl Key {
    /// Text content, if a text key
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}
