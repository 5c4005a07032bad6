//! Record construction protocol
//!
//! Fields are visited in declaration order, each going through
//! resolve, require-or-default, cast, validate and assign. The first failure
//! aborts the whole construction; no partial record is ever returned. Input
//! keys left over once every field is assigned are rejected together.

use std::sync::Arc;

use super::caster::ValueCaster;
use super::definition::{Definition, FieldDef};
use super::errors::{DtoError, DtoResult};
use super::record::Record;
use super::registry::Registry;
use super::validator::{invalid_type, ValueValidator};
use super::value::{Map, Value};
use crate::observability::Event;

/// Builds records for one registry, tracking the casting depth.
pub(crate) struct ObjectBuilder<'r> {
    registry: &'r Registry,
    depth: usize,
}

impl<'r> ObjectBuilder<'r> {
    /// Creates a builder for top-level construction.
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry, depth: 0 }
    }

    pub(crate) fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Constructs a record of `definition` from `input`.
    pub(crate) fn build(&self, definition: &Arc<Definition>, input: Map) -> DtoResult<Record> {
        tracing::debug!(
            event = %Event::ConstructBegin,
            definition = definition.name(),
            depth = self.depth,
            keys = input.len(),
            "constructing record"
        );

        let result = self.build_fields(definition, input);

        match &result {
            Ok(_) => tracing::debug!(
                event = %Event::ConstructComplete,
                definition = definition.name(),
                depth = self.depth,
                "record constructed"
            ),
            Err(e) => tracing::debug!(
                event = %Event::ConstructRejected,
                definition = definition.name(),
                depth = self.depth,
                code = %e.code(),
                error = %e,
                "record rejected"
            ),
        }

        result
    }

    /// Constructs a nested record one level deeper than this builder.
    pub(crate) fn nested(&self, name: &str, input: Map) -> DtoResult<Record> {
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| DtoError::UnknownDefinition(name.to_string()))?;

        let max_depth = self.registry.config().max_depth;
        if self.depth >= max_depth {
            return Err(DtoError::DepthExceeded {
                definition: definition.name().to_string(),
                max_depth,
            });
        }

        let child = ObjectBuilder {
            registry: self.registry,
            depth: self.depth + 1,
        };
        child.build(definition, input)
    }

    fn build_fields(&self, definition: &Arc<Definition>, mut input: Map) -> DtoResult<Record> {
        let validator = ValueValidator::new(self.registry);
        let mut fields = Map::with_capacity(definition.fields().len());

        for field in definition.fields() {
            let raw = self.resolve_raw(definition, field, &mut input)?;
            let descriptor = field.descriptor();

            let value = if raw.is_aggregate() {
                ValueCaster::new(self).cast(descriptor, raw)?
            } else {
                raw
            };

            if !validator.is_valid(descriptor, &value) {
                return Err(invalid_type(&definition.field_fqn(field), descriptor, &value));
            }

            fields.insert(field.name().to_string(), value);
        }

        if !input.is_empty() {
            return Err(DtoError::UnknownFields {
                definition: definition.name().to_string(),
                fields: input.into_keys().collect(),
            });
        }

        Ok(Record::new(Arc::clone(definition), fields))
    }

    /// Takes the field's input value, falling back to its default, then to
    /// null for nullable fields.
    fn resolve_raw(
        &self,
        definition: &Definition,
        field: &FieldDef,
        input: &mut Map,
    ) -> DtoResult<Value> {
        if let Some(value) = input.shift_remove(field.name()) {
            return Ok(value);
        }
        if let Some(default) = field.default_value() {
            return Ok(default.clone());
        }
        if field.descriptor().is_nullable() {
            return Ok(Value::Null);
        }
        Err(DtoError::Uninitialized {
            field: definition.field_fqn(field),
        })
    }
}
