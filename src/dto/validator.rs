//! Value validation against type descriptors
//!
//! Validation semantics:
//! - A field without declaration accepts everything
//! - Null is accepted when the declaration names `null`
//! - Otherwise at least one alternative must accept the value
//!
//! Alternatives:
//! - `T[]`: every element of a list (or value of a map) satisfies `T`; empty
//!   aggregates pass
//! - `mixed`: any non-null value
//! - kind names: exact runtime kind, after the `int`/`bool`/`float` aliases
//! - definition names: a record of that definition or of a subtype

use super::descriptor::{TypeAtom, TypeDescriptor};
use super::errors::DtoError;
use super::registry::Registry;
use super::value::{Kind, Value};

/// Validator bound to a registry, which answers subtype queries.
///
/// Validation does not mutate values and is deterministic.
pub struct ValueValidator<'r> {
    registry: &'r Registry,
}

impl<'r> ValueValidator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Returns true if `value` satisfies `descriptor`.
    pub fn is_valid(&self, descriptor: &TypeDescriptor, value: &Value) -> bool {
        if !descriptor.has_declaration() {
            return true;
        }

        if value.is_null() && descriptor.is_nullable() {
            return true;
        }

        descriptor
            .alternatives()
            .iter()
            .any(|atom| self.accepts(atom, value))
    }

    /// Returns true if a single alternative accepts `value`.
    pub fn accepts(&self, atom: &TypeAtom, value: &Value) -> bool {
        match atom {
            TypeAtom::ArrayOf(element) => match value {
                Value::List(items) => items.iter().all(|item| self.accepts(element, item)),
                Value::Map(map) => map.values().all(|item| self.accepts(element, item)),
                _ => false,
            },
            TypeAtom::Mixed => !value.is_null(),
            TypeAtom::Null => false,
            TypeAtom::Named(name) => match value {
                Value::Record(record) => self.registry.is_subtype(record.name(), name),
                Value::Collection(collection) => collection.name() == Some(name.as_str()),
                _ => false,
            },
            TypeAtom::Kind(kind) => {
                let actual = value.kind();
                actual == *kind
                    || (*kind == Kind::Double
                        && actual == Kind::Integer
                        && self.registry.config().integers_as_floats)
            }
        }
    }
}

/// Creates the error for a value that no alternative accepted.
pub(crate) fn invalid_type(fqn: &str, descriptor: &TypeDescriptor, value: &Value) -> DtoError {
    DtoError::InvalidType {
        field: fqn.to_string(),
        expected: descriptor.type_names().to_vec(),
        value: value.render(),
        kind: value.kind().to_string(),
    }
}
