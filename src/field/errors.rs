//! Field model construction errors

use thiserror::Error;

/// Result type for field construction
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while assembling a field tree.
///
/// These indicate a malformed shape, never a compatibility mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Empty field name")]
    EmptyName,

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Field '{0}' is not a structure")]
    NotAStructure(String),

    #[error("Field '{0}' is not a union")]
    NotAUnion(String),

    #[error("Variant union '{0}' cannot declare alternatives")]
    VariantWithAlternatives(String),
}
