//! Casting plain aggregates into records
//!
//! A list qualifies for sequence casting only when it is non-empty and every
//! element is a map; it is then cast through the first array alternative
//! naming a registered definition. Any map is a single-record candidate for
//! the first plain alternative naming a registered definition. Everything
//! else passes through to validation untouched.

use super::builder::ObjectBuilder;
use super::descriptor::TypeDescriptor;
use super::errors::DtoResult;
use super::value::{Map, Value};
use crate::observability::Event;

pub(crate) struct ValueCaster<'b, 'r> {
    builder: &'b ObjectBuilder<'r>,
}

impl<'b, 'r> ValueCaster<'b, 'r> {
    pub(crate) fn new(builder: &'b ObjectBuilder<'r>) -> Self {
        Self { builder }
    }

    /// Casts `value` according to `descriptor`, or returns it unchanged.
    pub(crate) fn cast(&self, descriptor: &TypeDescriptor, value: Value) -> DtoResult<Value> {
        match value {
            Value::List(items) if is_record_sequence(&items) => {
                self.cast_sequence(descriptor, items)
            }
            Value::Map(map) => self.cast_record(descriptor, map),
            other => Ok(other),
        }
    }

    fn cast_record(&self, descriptor: &TypeDescriptor, map: Map) -> DtoResult<Value> {
        let registry = self.builder.registry();
        let Some(target) = descriptor.object_types().find(|name| registry.contains(name)) else {
            return Ok(Value::Map(map));
        };

        tracing::trace!(event = %Event::RecordCast, definition = target, "casting map to record");
        self.builder.nested(target, map).map(Value::Record)
    }

    fn cast_sequence(&self, descriptor: &TypeDescriptor, items: Vec<Value>) -> DtoResult<Value> {
        let registry = self.builder.registry();
        let Some(target) = descriptor
            .array_object_types()
            .find(|name| registry.contains(name))
        else {
            return Ok(Value::List(items));
        };

        tracing::trace!(
            event = %Event::SequenceCast,
            definition = target,
            len = items.len(),
            "casting list to records"
        );
        items
            .into_iter()
            .map(|item| match item {
                Value::Map(map) => self.builder.nested(target, map).map(Value::Record),
                other => Ok(other),
            })
            .collect::<DtoResult<Vec<_>>>()
            .map(Value::List)
    }
}

fn is_record_sequence(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(|item| matches!(item, Value::Map(_)))
}
