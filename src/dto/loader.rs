//! Definition loader
//!
//! Reads definition tables from JSON so record types can be declared outside
//! the code:
//!
//! ```json
//! {
//!   "name": "User",
//!   "extends": "Base",
//!   "fields": [
//!     { "name": "email", "type": "string" },
//!     { "name": "role", "type": "string", "default": "member" },
//!     { "name": "meta" }
//!   ]
//! }
//! ```
//!
//! A document holds one definition or an array of them. A directory is read
//! file by file in name order, so parents can be placed in earlier files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::definition::{Definition, FieldDef};
use super::errors::{DtoError, DtoResult};
use super::registry::Registry;
use super::value::Value;
use crate::observability::Event;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionDoc {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDoc {
    name: String,
    #[serde(default, rename = "type")]
    declaration: Option<String>,
    // `Option<Value>` would read an explicit null default as absent
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<DefinitionDoc>),
    One(DefinitionDoc),
}

impl From<DefinitionDoc> for Definition {
    fn from(doc: DefinitionDoc) -> Self {
        let mut definition = Definition::new(doc.name);
        if let Some(parent) = doc.extends {
            definition = definition.extends(parent);
        }
        for field in doc.fields {
            let mut def = match field.declaration {
                Some(declaration) => FieldDef::new(field.name, declaration),
                None => FieldDef::untyped(field.name),
            };
            if let Some(default) = field.default {
                def = def.with_default(default);
            }
            definition = definition.with(def);
        }
        definition
    }
}

/// Loads definitions from JSON documents into a registry.
pub struct DefinitionLoader<'a> {
    registry: &'a mut Registry,
}

impl<'a> DefinitionLoader<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        Self { registry }
    }

    /// Parses definitions from a JSON string without registering them.
    pub fn parse(source_name: &str, json: &str) -> DtoResult<Vec<Definition>> {
        let document: Document = serde_json::from_str(json)
            .map_err(|e| DtoError::malformed(source_name, format!("Invalid JSON: {}", e)))?;

        let docs = match document {
            Document::Many(docs) => docs,
            Document::One(doc) => vec![doc],
        };
        Ok(docs.into_iter().map(Definition::from).collect())
    }

    /// Registers every definition in a JSON string, in document order.
    ///
    /// Returns the registered names.
    pub fn load_str(&mut self, source_name: &str, json: &str) -> DtoResult<Vec<String>> {
        let mut names = Vec::new();
        for definition in Self::parse(source_name, json)? {
            let registered = self.registry.register(definition)?;
            names.push(registered.name().to_string());
        }
        Ok(names)
    }

    /// Registers the definitions of one file.
    pub fn load_file(&mut self, path: &Path) -> DtoResult<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| {
            DtoError::malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;
        self.load_str(&path.display().to_string(), &content)
    }

    /// Registers every `*.json` file of a directory, in file name order.
    ///
    /// A missing directory loads nothing.
    pub fn load_dir(&mut self, dir: &Path) -> DtoResult<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            DtoError::malformed(
                dir.display().to_string(),
                format!("Failed to read definition directory: {}", e),
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                DtoError::malformed(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut names = Vec::new();
        for path in &paths {
            names.extend(self.load_file(path)?);
        }

        tracing::info!(
            event = %Event::DefinitionsLoaded,
            dir = %dir.display(),
            files = paths.len(),
            definitions = names.len(),
            "loaded definitions"
        );
        Ok(names)
    }
}
