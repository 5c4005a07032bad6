//! Typed record subsystem
//!
//! Untyped key-value input is cast and validated into immutable records
//! according to per-field type declarations.
//!
//! # Design Principles
//!
//! - Declarations are the single source of truth
//! - Closed world: undeclared input keys are rejected
//! - No partial records: the first failure aborts construction
//! - Records are immutable; filters and edits return new records
//! - Deterministic validation

mod builder;
mod caster;
mod collection;
mod config;
mod definition;
mod descriptor;
mod errors;
mod immutable;
mod loader;
mod record;
mod registry;
mod validator;
mod value;

pub use collection::{Collection, Iter};
pub use config::{DtoConfig, DEFAULT_MAX_DEPTH};
pub use definition::{Definition, FieldDef};
pub use descriptor::{extract_doc_declaration, TypeAtom, TypeDescriptor};
pub use errors::{DtoError, DtoErrorCode, DtoResult};
pub use immutable::ImmutableRecord;
pub use loader::DefinitionLoader;
pub use record::Record;
pub use registry::Registry;
pub use validator::ValueValidator;
pub use value::{Kind, Map, Value};
