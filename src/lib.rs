//! strictdto - Strictly-typed data transfer objects from untyped key-value input
//!
//! Record types are declared as field tables with per-field type
//! declarations (`string`, `int|null`, `Child[]`, ...). Input mappings are
//! cast and validated against them into immutable records.
//!
//! ```
//! use strictdto::{Definition, Registry};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.register(Definition::new("Child").field("name", "string")).unwrap();
//! registry
//!     .register(Definition::new("Parent").field("name", "string").field("child", "Child"))
//!     .unwrap();
//!
//! let input = json!({"name": "parent", "child": {"name": "child"}});
//! let parent = registry.construct_json("Parent", &input).unwrap();
//!
//! assert_eq!(parent.get("child").unwrap().as_record().unwrap().name(), "Child");
//! assert_eq!(parent.to_json(), input);
//! ```

pub mod dto;
pub mod observability;

pub use dto::{
    Collection, Definition, DefinitionLoader, DtoConfig, DtoError, DtoErrorCode, DtoResult,
    FieldDef, ImmutableRecord, Kind, Map, Record, Registry, TypeAtom, TypeDescriptor, Value,
};
