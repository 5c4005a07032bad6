//! Definition registry
//!
//! Maps type tags to definitions. Definitions are registered at startup;
//! afterwards the registry is only read, so a shared reference can serve
//! concurrent constructions.

use std::collections::HashMap;
use std::sync::Arc;

use super::builder::ObjectBuilder;
use super::config::DtoConfig;
use super::definition::Definition;
use super::descriptor::{is_reserved_name, TypeDescriptor};
use super::errors::{DtoError, DtoResult};
use super::immutable::ImmutableRecord;
use super::record::Record;
use super::validator::ValueValidator;
use super::value::{Map, Value};
use crate::observability::Event;

/// Registry of record definitions and the construction entry point.
#[derive(Debug, Default)]
pub struct Registry {
    /// Definitions by name
    definitions: HashMap<String, Arc<Definition>>,
    config: DtoConfig,
}

impl Registry {
    /// Create an empty registry with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given options
    pub fn with_config(config: DtoConfig) -> Self {
        Self {
            definitions: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &DtoConfig {
        &self.config
    }

    /// Registers a definition.
    ///
    /// A parent named by `extends` must already be registered; its fields are
    /// inherited ahead of the definition's own. Type keywords (`object`,
    /// `string`, `mixed`, ... in any case) cannot be used as names.
    pub fn register(&mut self, mut definition: Definition) -> DtoResult<Arc<Definition>> {
        let name = normalize(definition.name()).to_string();
        if is_reserved_name(&name) {
            return Err(DtoError::ReservedName(name));
        }
        if self.definitions.contains_key(&name) {
            return Err(DtoError::DuplicateDefinition(name));
        }

        if let Some(parent_name) = definition.parent().map(str::to_string) {
            let parent = self
                .get(&parent_name)
                .cloned()
                .ok_or(DtoError::UnknownDefinition(parent_name))?;
            definition.inherit(&parent);
        }

        let definition = Arc::new(definition);
        self.definitions.insert(name.clone(), Arc::clone(&definition));

        tracing::debug!(
            event = %Event::DefinitionRegistered,
            definition = %name,
            fields = definition.fields().len(),
            "registered definition"
        );
        Ok(definition)
    }

    /// Gets a definition by name
    pub fn get(&self, name: &str) -> Option<&Arc<Definition>> {
        self.definitions.get(normalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered definition names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True if `name` is `ancestor` or extends it, directly or transitively.
    pub fn is_subtype(&self, name: &str, ancestor: &str) -> bool {
        let ancestor = normalize(ancestor);
        let mut current = Some(normalize(name));
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self
                .get(candidate)
                .and_then(|def| def.parent())
                .map(normalize);
        }
        false
    }

    /// Checks a value against a descriptor without constructing anything
    pub fn is_valid(&self, descriptor: &TypeDescriptor, value: &Value) -> bool {
        ValueValidator::new(self).is_valid(descriptor, value)
    }

    /// Constructs a record of the named definition from an input mapping.
    ///
    /// # Errors
    ///
    /// - `UnknownDefinition` if the name is not registered
    /// - `Uninitialized`, `InvalidType`, `UnknownFields` from the field protocol
    /// - `DepthExceeded` if nested casting goes beyond `max_depth`
    pub fn construct(&self, name: &str, input: Map) -> DtoResult<Record> {
        let definition = self
            .get(name)
            .ok_or_else(|| DtoError::UnknownDefinition(name.to_string()))?;
        ObjectBuilder::new(self).build(definition, input)
    }

    /// Constructs a record from any value, which must be a map.
    pub fn construct_value(&self, name: &str, input: Value) -> DtoResult<Record> {
        match input {
            Value::Map(map) => self.construct(name, map),
            other => Err(DtoError::NotAMapping {
                definition: name.to_string(),
                kind: other.kind().to_string(),
            }),
        }
    }

    /// Constructs a record from decoded JSON.
    pub fn construct_json(&self, name: &str, json: &serde_json::Value) -> DtoResult<Record> {
        self.construct_value(name, Value::from(json))
    }

    /// Constructs a record and wraps it in a read-only view.
    pub fn construct_immutable(&self, name: &str, input: Map) -> DtoResult<ImmutableRecord> {
        self.construct(name, input).map(Record::immutable)
    }
}

fn normalize(name: &str) -> &str {
    name.trim_start_matches('\\')
}
