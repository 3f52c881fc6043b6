//! ScavReplacer Graph Model
//!
//! A capability-based view over an arbitrarily shaped, possibly cyclic object
//! graph. Every value is either a scalar or a handle to a shared node.
//!
//! # Core Concepts
//!
//! - [`Value`]: Scalar (`Null`, `Bool`, `Int`, `Float`, `Text`, `Symbol`) or [`NodeRef`]
//! - [`NodeRef`]: Shared, lockable handle whose allocation is its identity ([`NodeId`])
//! - [`Node`]: `Mapping`, `Sequence` or `Record`
//! - [`Record`]: Named fields that can be enumerated, read and written at run time
//! - [`FieldRepr`]: Native representation of a field, used to coerce writes
//! - [`VisitedSet`]: Identity-keyed guard against cycles and aliases
//!
//! # Example
//!
//! ```rust
//! use scav_graph::{DynRecord, FieldRepr, NodeRef, Value};
//!
//! let wave = NodeRef::record(
//!     DynRecord::new("Wave").with("Role", FieldRepr::Text, "assault"),
//! );
//! let waves = NodeRef::sequence(vec![Value::Node(wave.clone()), Value::Node(wave)]);
//! assert_eq!(waves.read().as_sequence().map(Vec::len), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod dyn_record;
mod error;
mod node;
mod record;
mod symbol;
mod value;

/// JSON adapters
pub mod json;

// Re-exports
pub use dyn_record::DynRecord;
pub use error::{AccessError, GraphError};
pub use node::{Mapping, Node, NodeId, NodeRef, VisitedSet};
pub use record::{Access, FieldInfo, FieldRepr, Record};
pub use symbol::{EnumDef, Symbol};
pub use value::{Key, NodeKind, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
