//! Records with dynamically enumerable fields
//!
//! Provides the [`Record`] capability trait and the field descriptors that
//! describe how each field is stored natively.

use std::borrow::Cow;
use std::fmt::Debug;

use crate::error::AccessError;
use crate::symbol::EnumDef;
use crate::value::Value;

/// Native representation of a field
///
/// Determines how a replacement text is converted before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRepr {
    /// Plain text
    Text,
    /// Symbol of an enumeration
    Enum(&'static EnumDef),
    /// Symbol of an enumeration, or null
    OptionalEnum(&'static EnumDef),
    /// Untyped; accepts any value
    Dynamic,
    /// Any other native type, named for diagnostics; never written
    Unsupported(&'static str),
}

impl FieldRepr {
    /// Convert a replacement text into this representation
    ///
    /// Returns `None` if the text is not a symbol of the field's enumeration
    /// or the representation does not support writes.
    ///
    /// # Examples
    /// ```
    /// # use scav_graph::{EnumDef, FieldRepr, Value};
    /// static ROLE: EnumDef = EnumDef::new("Role", &["assault", "pmcBot"]);
    ///
    /// assert_eq!(FieldRepr::Text.coerce("pmcBot"), Some(Value::from("pmcBot")));
    /// assert!(matches!(FieldRepr::Enum(&ROLE).coerce("PMCBOT"), Some(Value::Symbol(_))));
    /// assert_eq!(FieldRepr::Enum(&ROLE).coerce("raider"), None);
    /// assert_eq!(FieldRepr::Unsupported("i32").coerce("pmcBot"), None);
    /// ```
    #[must_use]
    pub fn coerce(&self, text: &str) -> Option<Value> {
        match self {
            Self::Text | Self::Dynamic => Some(Value::Text(text.to_string())),
            Self::Enum(def) | Self::OptionalEnum(def) => def.parse(text).map(Value::Symbol),
            Self::Unsupported(_) => None,
        }
    }

    /// Check if a value may be stored in a field of this representation
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Dynamic, _) | (Self::Text | Self::OptionalEnum(_), Value::Null) => true,
            (Self::Text, Value::Text(_)) => true,
            (Self::Enum(def) | Self::OptionalEnum(def), Value::Symbol(sym)) => sym.is_of(def),
            _ => false,
        }
    }
}

/// Read/write capability of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Field can be read
    pub readable: bool,
    /// Field can be written
    pub writable: bool,
}

impl Access {
    /// Readable and writable
    pub const READ_WRITE: Self = Self {
        readable: true,
        writable: true,
    };

    /// Readable only
    pub const READ_ONLY: Self = Self {
        readable: true,
        writable: false,
    };

    /// Writable only
    pub const WRITE_ONLY: Self = Self {
        readable: false,
        writable: true,
    };
}

impl Default for Access {
    fn default() -> Self {
        Self::READ_WRITE
    }
}

/// Field descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name
    pub name: Cow<'static, str>,
    /// Native representation
    pub repr: FieldRepr,
    /// Read/write capability
    pub access: Access,
    /// Field takes an index argument and cannot be read plainly
    pub indexed: bool,
}

impl FieldInfo {
    /// Readable and writable field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, repr: FieldRepr) -> Self {
        Self {
            name: name.into(),
            repr,
            access: Access::READ_WRITE,
            indexed: false,
        }
    }

    /// With access capability
    #[inline]
    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Mark as indexed
    #[inline]
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Check if the field can be read without arguments
    #[inline]
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.access.readable && !self.indexed
    }

    /// Check if the field can be written without arguments
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.access.writable && !self.indexed
    }
}

/// A node with named fields discovered at run time
///
/// Domain types implement this once instead of being inspected by
/// reflection. Field names are matched case-insensitively by [`Record::field`].
pub trait Record: Debug + Send + Sync {
    /// Name of the record's type
    fn type_name(&self) -> &str;

    /// Declared fields, in declaration order
    fn fields(&self) -> &[FieldInfo];

    /// Read a field by its declared name
    ///
    /// # Errors
    /// Returns error if the field is missing, unreadable, or the read fails
    fn get(&self, name: &str) -> Result<Value, AccessError>;

    /// Write a field by its declared name
    ///
    /// # Errors
    /// Returns error if the field is missing, read-only, or the value does not
    /// fit the field's representation
    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError>;

    /// Find a field descriptor, ignoring case
    fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields()
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Check if any of the given field names is declared and readable
    fn exposes_any(&self, names: &[&str]) -> bool {
        names
            .iter()
            .any(|name| self.field(name).is_some_and(FieldInfo::is_readable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ROLE: EnumDef = EnumDef::new("Role", &["assault", "pmcBot"]);
    static SIDE: EnumDef = EnumDef::new("Side", &["pmcBot"]);

    #[test]
    fn coerce_per_representation() {
        assert_eq!(FieldRepr::Dynamic.coerce("pmcBot"), Some(Value::from("pmcBot")));
        let sym = FieldRepr::OptionalEnum(&ROLE).coerce("pmcbot").unwrap();
        assert_eq!(sym.text().as_deref(), Some("pmcBot"));
        assert_eq!(FieldRepr::OptionalEnum(&ROLE).coerce("exUsec"), None);
    }

    #[test]
    fn accepts_checks_enum_membership() {
        let role = Value::Symbol(ROLE.parse("pmcBot").unwrap());
        let side = Value::Symbol(SIDE.parse("pmcBot").unwrap());
        assert!(FieldRepr::Enum(&ROLE).accepts(&role));
        assert!(!FieldRepr::Enum(&ROLE).accepts(&side));
        assert!(!FieldRepr::Enum(&ROLE).accepts(&Value::Null));
        assert!(FieldRepr::OptionalEnum(&ROLE).accepts(&Value::Null));
        assert!(!FieldRepr::Text.accepts(&role));
        assert!(FieldRepr::Dynamic.accepts(&role));
        assert!(!FieldRepr::Unsupported("i32").accepts(&Value::Int(1)));
    }

    #[test]
    fn indexed_fields_are_not_readable() {
        let field = FieldInfo::new("Item", FieldRepr::Dynamic).indexed();
        assert!(!field.is_readable());
        assert!(!field.is_writable());

        let write_only = FieldInfo::new("Sink", FieldRepr::Text).with_access(Access::WRITE_ONLY);
        assert!(!write_only.is_readable());
        assert!(write_only.is_writable());
    }
}
