//! Error types for graph access

use crate::node::NodeId;

/// Errors reading or writing a single record field
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    /// Record does not declare the field
    #[error("{type_name} has no field '{field}'")]
    NoSuchField { type_name: String, field: String },

    /// Field exists but cannot be read
    #[error("field '{0}' is not readable")]
    NotReadable(String),

    /// Field exists but cannot be written
    #[error("field '{0}' is not writable")]
    NotWritable(String),

    /// Value does not fit the field's native representation
    #[error("field '{field}' does not accept a {found} value")]
    TypeMismatch { field: String, found: &'static str },

    /// Record-specific failure while reading or writing
    #[error("failed to access '{field}': {reason}")]
    Faulted { field: String, reason: String },
}

impl AccessError {
    /// Create a missing-field error
    pub fn no_such_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NoSuchField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a record-specific failure
    pub fn faulted(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Faulted {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors converting a graph into another representation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Node is its own ancestor
    #[error("cycle detected at node {0}")]
    Cycle(NodeId),

    /// Float has no JSON representation
    #[error("non-finite float {0} cannot be represented")]
    NonFiniteFloat(f64),
}
