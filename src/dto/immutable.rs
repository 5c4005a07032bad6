//! Read-only record view

use std::ops::Deref;

use super::errors::{DtoError, DtoResult};
use super::record::Record;
use super::value::Value;

/// Read-only view over a [`Record`].
///
/// Reads delegate to the record. Every write is rejected with
/// `ImmutabilityViolation` and leaves the record untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableRecord {
    record: Record,
}

impl ImmutableRecord {
    pub(crate) fn new(record: Record) -> Self {
        Self { record }
    }

    /// Rejects the write.
    pub fn set(&mut self, field: &str, _value: impl Into<Value>) -> DtoResult<()> {
        Err(DtoError::ImmutabilityViolation {
            field: field.to_string(),
        })
    }

    /// Returns the wrapped record
    pub fn into_inner(self) -> Record {
        self.record
    }
}

impl Deref for ImmutableRecord {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::definition::Definition;
    use crate::dto::registry::Registry;
    use serde_json::json;

    #[test]
    fn test_writes_rejected() {
        let mut registry = Registry::new();
        registry
            .register(Definition::new("Config").field("name", "string"))
            .unwrap();

        let mut view = registry
            .construct_json("Config", &json!({"name": "a"}))
            .unwrap()
            .immutable();

        let err = view.set("name", "b").unwrap_err();
        assert_eq!(
            err,
            DtoError::ImmutabilityViolation {
                field: "name".into()
            }
        );
        assert!(err.to_string().contains("name"));
        assert_eq!(view.get("name"), Some(&Value::from("a")));
        assert_eq!(view.to_json(), json!({"name": "a"}));
    }
}
