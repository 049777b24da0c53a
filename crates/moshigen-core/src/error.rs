//! Error types for adapter generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Message suffix used by generated decoders when a required field is absent.
///
/// The generated `fromJson` throws `IOException("<json-name>" + MISSING_FIELD_SUFFIX)`.
pub const MISSING_FIELD_SUFFIX: &str = " is non-optional but was not found in the json";

/// Build the message a generated decoder raises for a missing required field.
pub fn missing_field_message(json_name: &str) -> String {
    format!("{json_name}{MISSING_FIELD_SUFFIX}")
}

/// Why a target type failed the visibility gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityViolation {
    NotPublic,
    Abstract,
}

impl std::fmt::Display for VisibilityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityViolation::NotPublic => write!(f, "is not public"),
            VisibilityViolation::Abstract => write!(f, "is abstract"),
        }
    }
}

/// Error raised while generating code for a single target type.
///
/// Every variant names the qualified type it was raised for; field-level
/// variants also name the field.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The type declares no constructor
    #[error("class {type_name} must have a constructor")]
    MissingConstructor { type_name: String },

    /// The type declares more than one constructor
    #[error("class {type_name} must have only 1 constructor, found {count}")]
    MultipleConstructors { type_name: String, count: usize },

    /// The sole constructor takes no parameters
    #[error("class {type_name} must have a non-empty constructor")]
    EmptyConstructor { type_name: String },

    /// A field uses a primitive kind with no decode strategy
    #[error("class {type_name}: field '{field}' has unsupported primitive type {kind}")]
    UnsupportedPrimitive {
        type_name: String,
        field: String,
        kind: String,
    },

    /// A field is a single-dimension primitive array
    #[error("class {type_name}: field '{field}' is a primitive array ({ty}), which is not supported")]
    UnsupportedPrimitiveArray {
        type_name: String,
        field: String,
        ty: String,
    },

    /// Two fields decode from the same JSON key
    #[error("class {type_name}: json key '{key}' is used by more than one field")]
    DuplicateJsonKey { type_name: String, key: String },

    /// The type is not public or is abstract
    #[error("class {type_name} {violation}")]
    InvalidVisibility {
        type_name: String,
        violation: VisibilityViolation,
    },

    /// The enclosing package could not be determined
    #[error("failed to find package of {type_name}")]
    NamespaceResolution { type_name: String },

    /// The code sink could not store a generated unit
    #[error("failed to persist {unit}: {source}")]
    Persistence {
        unit: String,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Qualified name of the type (or generated unit) the error was raised for
    pub fn type_name(&self) -> &str {
        match self {
            GenerateError::MissingConstructor { type_name }
            | GenerateError::MultipleConstructors { type_name, .. }
            | GenerateError::EmptyConstructor { type_name }
            | GenerateError::UnsupportedPrimitive { type_name, .. }
            | GenerateError::UnsupportedPrimitiveArray { type_name, .. }
            | GenerateError::DuplicateJsonKey { type_name, .. }
            | GenerateError::InvalidVisibility { type_name, .. }
            | GenerateError::NamespaceResolution { type_name } => type_name,
            GenerateError::Persistence { unit, .. } => unit,
        }
    }

    /// Field the error was raised for, if it is a field-level error
    pub fn field(&self) -> Option<&str> {
        match self {
            GenerateError::UnsupportedPrimitive { field, .. }
            | GenerateError::UnsupportedPrimitiveArray { field, .. } => Some(field),
            _ => None,
        }
    }
}
