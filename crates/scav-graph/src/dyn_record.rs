//! General-purpose record
//!
//! Provides [`DynRecord`], a record assembled at run time from field
//! descriptors and values. Used for schema-driven data and in tests.

use std::borrow::Cow;

use crate::error::AccessError;
use crate::record::{Access, FieldInfo, FieldRepr, Record};
use crate::value::Value;

/// Record built from descriptor/value slots
///
/// Field order is insertion order. Writes are checked against each slot's
/// [`FieldRepr`] and [`Access`].
#[derive(Debug, Clone, Default)]
pub struct DynRecord {
    type_name: String,
    fields: Vec<FieldInfo>,
    values: Vec<Value>,
}

impl DynRecord {
    /// Create empty record
    #[inline]
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            values: Vec::new(),
        }
    }

    /// With a readable and writable field
    #[inline]
    #[must_use]
    pub fn with(
        self,
        name: impl Into<Cow<'static, str>>,
        repr: FieldRepr,
        value: impl Into<Value>,
    ) -> Self {
        self.with_field(FieldInfo::new(name, repr), value)
    }

    /// With a field of explicit access
    #[inline]
    #[must_use]
    pub fn with_access(
        self,
        name: impl Into<Cow<'static, str>>,
        repr: FieldRepr,
        access: Access,
        value: impl Into<Value>,
    ) -> Self {
        self.with_field(FieldInfo::new(name, repr).with_access(access), value)
    }

    /// With a field descriptor
    #[inline]
    #[must_use]
    pub fn with_field(mut self, info: FieldInfo, value: impl Into<Value>) -> Self {
        self.push_field(info, value);
        self
    }

    /// Add or replace a field
    ///
    /// A field whose name matches an existing one (ignoring case) replaces it
    /// in place.
    pub fn push_field(&mut self, info: FieldInfo, value: impl Into<Value>) {
        let value = value.into();
        match self.position(&info.name) {
            Some(index) => {
                self.fields[index] = info;
                self.values[index] = value;
            }
            None => {
                self.fields.push(info);
                self.values.push(value);
            }
        }
    }

    /// Stored value, bypassing access checks
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|index| &self.values[index])
    }

    /// Descriptor/value pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldInfo, &Value)> {
        self.fields.iter().zip(self.values.iter())
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if record has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.name.eq_ignore_ascii_case(name))
    }
}

impl Record for DynRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    fn get(&self, name: &str) -> Result<Value, AccessError> {
        let index = self
            .position(name)
            .ok_or_else(|| AccessError::no_such_field(&self.type_name, name))?;
        let field = &self.fields[index];
        if !field.is_readable() {
            return Err(AccessError::NotReadable(field.name.to_string()));
        }
        Ok(self.values[index].clone())
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        let index = self
            .position(name)
            .ok_or_else(|| AccessError::no_such_field(&self.type_name, name))?;
        let field = &self.fields[index];
        if !field.is_writable() {
            return Err(AccessError::NotWritable(field.name.to_string()));
        }
        if !field.repr.accepts(&value) {
            return Err(AccessError::TypeMismatch {
                field: field.name.to_string(),
                found: value.variant_name(),
            });
        }
        self.values[index] = value;
        Ok(())
    }
}
