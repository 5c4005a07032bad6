//! Typed record instances
//!
//! A record is created once by the registry and never mutated. View filters
//! (`only`/`except`) and reconstruction (`with_field`) return new records;
//! filtered copies share the field storage of the original.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Serialize, Serializer};

use super::definition::Definition;
use super::errors::DtoResult;
use super::immutable::ImmutableRecord;
use super::registry::Registry;
use super::value::{Map, Value};

/// Typed instance of a [`Definition`]
#[derive(Clone)]
pub struct Record {
    definition: Arc<Definition>,
    fields: Arc<Map>,
    only: IndexSet<String>,
    except: IndexSet<String>,
}

impl Record {
    pub(crate) fn new(definition: Arc<Definition>, fields: Map) -> Self {
        Self {
            definition,
            fields: Arc::new(fields),
            only: IndexSet::new(),
            except: IndexSet::new(),
        }
    }

    /// Definition name
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &Arc<Definition> {
        &self.definition
    }

    /// Field value by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Every field with its raw value, ignoring view restrictions
    pub fn all(&self) -> &Map {
        &self.fields
    }

    /// Returns a copy whose flattened view includes only the given fields,
    /// in addition to any fields already included.
    pub fn only<I>(&self, fields: I) -> Record
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut record = self.clone();
        record.only.extend(fields.into_iter().map(Into::into));
        record
    }

    /// Returns a copy whose flattened view excludes the given fields, in
    /// addition to any fields already excluded.
    pub fn except<I>(&self, fields: I) -> Record
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut record = self.clone();
        record.except.extend(fields.into_iter().map(Into::into));
        record
    }

    /// Plain-data projection.
    ///
    /// The inclusion set wins when non-empty, otherwise the exclusion set
    /// applies. Nested records, collections and aggregates are flattened
    /// recursively.
    pub fn flatten(&self) -> Map {
        self.fields
            .iter()
            .filter(|(name, _)| self.is_visible(name))
            .map(|(name, value)| (name.clone(), value.flatten()))
            .collect()
    }

    /// Flattened projection as JSON
    pub fn to_json(&self) -> serde_json::Value {
        Value::Map(self.flatten()).to_json()
    }

    /// Rebuilds the record with one field replaced.
    ///
    /// The new value goes through the full construction protocol; the
    /// receiver is left unchanged and view restrictions are not carried over.
    pub fn with_field(
        &self,
        registry: &Registry,
        field: &str,
        value: impl Into<Value>,
    ) -> DtoResult<Record> {
        let mut input = self.fields.as_ref().clone();
        input.insert(field.to_string(), value.into());
        registry.construct(self.name(), input)
    }

    /// Wraps the record in a read-only view
    pub fn immutable(self) -> ImmutableRecord {
        ImmutableRecord::new(self)
    }

    fn is_visible(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            self.only.contains(name)
        } else {
            !self.except.contains(name)
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.fields == other.fields
            && self.only == other.only
            && self.except == other.except
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("definition", &self.name())
            .field("fields", &self.fields)
            .field("only", &self.only)
            .field("except", &self.except)
            .finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
