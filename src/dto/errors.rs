//! DTO error types
//!
//! Error codes:
//! - DTO_UNKNOWN_FIELDS (input)
//! - DTO_INVALID_TYPE (input)
//! - DTO_UNINITIALIZED (input)
//! - DTO_IMMUTABLE (input)
//! - DTO_NOT_A_MAPPING (input)
//! - DTO_DEPTH_EXCEEDED (input)
//! - DTO_UNKNOWN_DEFINITION (definition)
//! - DTO_DUPLICATE_DEFINITION (definition)
//! - DTO_RESERVED_NAME (definition)
//! - DTO_MALFORMED_DEFINITION (definition)

use std::fmt;

use thiserror::Error;

/// Result type for DTO operations
pub type DtoResult<T> = Result<T, DtoError>;

/// Stable error codes, one per [`DtoError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtoErrorCode {
    /// Input supplied keys that are not declared
    DtoUnknownFields,
    /// A value matched none of the declared alternatives
    DtoInvalidType,
    /// A required field was not supplied
    DtoUninitialized,
    /// Mutation attempted on a read-only view
    DtoImmutable,
    /// Construction input was not a mapping
    DtoNotAMapping,
    /// Nested casting went deeper than allowed
    DtoDepthExceeded,
    /// Definition name is not registered
    DtoUnknownDefinition,
    /// Definition name is already registered
    DtoDuplicateDefinition,
    /// Definition name collides with a built-in type keyword
    DtoReservedName,
    /// Definition document could not be read or parsed
    DtoMalformedDefinition,
}

impl DtoErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DtoErrorCode::DtoUnknownFields => "DTO_UNKNOWN_FIELDS",
            DtoErrorCode::DtoInvalidType => "DTO_INVALID_TYPE",
            DtoErrorCode::DtoUninitialized => "DTO_UNINITIALIZED",
            DtoErrorCode::DtoImmutable => "DTO_IMMUTABLE",
            DtoErrorCode::DtoNotAMapping => "DTO_NOT_A_MAPPING",
            DtoErrorCode::DtoDepthExceeded => "DTO_DEPTH_EXCEEDED",
            DtoErrorCode::DtoUnknownDefinition => "DTO_UNKNOWN_DEFINITION",
            DtoErrorCode::DtoDuplicateDefinition => "DTO_DUPLICATE_DEFINITION",
            DtoErrorCode::DtoReservedName => "DTO_RESERVED_NAME",
            DtoErrorCode::DtoMalformedDefinition => "DTO_MALFORMED_DEFINITION",
        }
    }
}

impl fmt::Display for DtoErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Construction, validation and registry errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DtoError {
    // ==================
    // Input Errors
    // ==================
    /// Input mapping carried keys the definition does not declare
    #[error("Public properties `{}` not found on {definition}", .fields.join("`, `"))]
    UnknownFields {
        definition: String,
        fields: Vec<String>,
    },

    /// A field's effective value satisfied none of its alternatives
    #[error(
        "Invalid type: expected {field} to be of type {}, instead got value `{value}` ({kind}).",
        .expected.join(", ")
    )]
    InvalidType {
        field: String,
        expected: Vec<String>,
        value: String,
        kind: String,
    },

    /// Non-nullable field without a default was not supplied
    #[error("Non-nullable property {field} has not been initialized.")]
    Uninitialized { field: String },

    /// Write attempted through a read-only view
    #[error("Cannot change the value of property {field} on an immutable data transfer object")]
    ImmutabilityViolation { field: String },

    /// Construction input was not a key-value mapping
    #[error("Cannot construct {definition} from a value of type {kind}; a mapping is required")]
    NotAMapping { definition: String, kind: String },

    /// Nested casting exceeded the configured depth
    #[error("Casting {definition} exceeds the maximum nesting depth of {max_depth}")]
    DepthExceeded { definition: String, max_depth: usize },

    // ==================
    // Definition Errors
    // ==================
    /// No definition is registered under the name
    #[error("Definition '{0}' is not registered")]
    UnknownDefinition(String),

    /// A definition with the same name is already registered
    #[error("Definition '{0}' is already registered")]
    DuplicateDefinition(String),

    /// The name is a type keyword and could never be referenced by a declaration
    #[error("Definition name '{0}' is a reserved type keyword")]
    ReservedName(String),

    /// A definition document could not be read or parsed
    #[error("Malformed definition source '{source_name}': {reason}")]
    MalformedDefinition { source_name: String, reason: String },
}

impl DtoError {
    /// Returns the stable error code
    pub fn code(&self) -> DtoErrorCode {
        match self {
            DtoError::UnknownFields { .. } => DtoErrorCode::DtoUnknownFields,
            DtoError::InvalidType { .. } => DtoErrorCode::DtoInvalidType,
            DtoError::Uninitialized { .. } => DtoErrorCode::DtoUninitialized,
            DtoError::ImmutabilityViolation { .. } => DtoErrorCode::DtoImmutable,
            DtoError::NotAMapping { .. } => DtoErrorCode::DtoNotAMapping,
            DtoError::DepthExceeded { .. } => DtoErrorCode::DtoDepthExceeded,
            DtoError::UnknownDefinition(_) => DtoErrorCode::DtoUnknownDefinition,
            DtoError::DuplicateDefinition(_) => DtoErrorCode::DtoDuplicateDefinition,
            DtoError::ReservedName(_) => DtoErrorCode::DtoReservedName,
            DtoError::MalformedDefinition { .. } => DtoErrorCode::DtoMalformedDefinition,
        }
    }

    /// Returns true if the error was caused by caller data rather than by
    /// the definitions themselves
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            DtoError::UnknownDefinition(_)
                | DtoError::DuplicateDefinition(_)
                | DtoError::ReservedName(_)
                | DtoError::MalformedDefinition { .. }
        )
    }

    pub(crate) fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        DtoError::MalformedDefinition {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DtoErrorCode::DtoUnknownFields.code(), "DTO_UNKNOWN_FIELDS");
        assert_eq!(DtoErrorCode::DtoInvalidType.code(), "DTO_INVALID_TYPE");
        assert_eq!(DtoErrorCode::DtoUninitialized.code(), "DTO_UNINITIALIZED");
        assert_eq!(DtoErrorCode::DtoImmutable.code(), "DTO_IMMUTABLE");
        assert_eq!(
            DtoError::UnknownDefinition("X".into()).code().code(),
            "DTO_UNKNOWN_DEFINITION"
        );
    }

    #[test]
    fn test_unknown_fields_lists_every_key() {
        let err = DtoError::UnknownFields {
            definition: "User".into(),
            fields: vec!["foo".into(), "bar".into()],
        };
        assert_eq!(err.to_string(), "Public properties `foo`, `bar` not found on User");
    }

    #[test]
    fn test_invalid_type_message() {
        let err = DtoError::InvalidType {
            field: "User::age".into(),
            expected: vec!["int".into(), "null".into()],
            value: "abc".into(),
            kind: "string".into(),
        };
        let display = err.to_string();
        assert!(display.contains("User::age"));
        assert!(display.contains("int, null"));
        assert!(display.contains("`abc` (string)"));
    }

    #[test]
    fn test_input_vs_definition_errors() {
        assert!(DtoError::Uninitialized { field: "A::b".into() }.is_input_error());
        assert!(!DtoError::DuplicateDefinition("A".into()).is_input_error());
        assert!(!DtoError::ReservedName("Object".into()).is_input_error());
        assert!(!DtoError::malformed("a.json", "bad").is_input_error());
    }
}
