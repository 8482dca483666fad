//! Shape registry error types
//!
//! Error codes:
//! - NT_UNKNOWN_SHAPE (REJECT)
//! - NT_MALFORMED_SHAPE (FATAL)
//! - NT_SHAPE_IMMUTABLE (REJECT)
//!
//! Compatibility mismatches are not errors; they are reported through
//! `ValidationResult`.

use std::fmt;

use crate::field::FieldError;

/// Severity levels for shape errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, caller may continue
    Reject,
    /// Shape set is unusable (malformed files at load time)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Shape error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeErrorCode {
    /// No shape registered under the requested name
    UnknownShape,
    /// Shape file unreadable, unparsable or structurally invalid
    MalformedShape,
    /// Attempt to replace a registered shape
    ShapeImmutable,
}

impl ShapeErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ShapeErrorCode::UnknownShape => "NT_UNKNOWN_SHAPE",
            ShapeErrorCode::MalformedShape => "NT_MALFORMED_SHAPE",
            ShapeErrorCode::ShapeImmutable => "NT_SHAPE_IMMUTABLE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ShapeErrorCode::MalformedShape => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for ShapeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Shape error with context
#[derive(Debug)]
pub struct ShapeError {
    code: ShapeErrorCode,
    message: String,
    shape: Option<String>,
    source: Option<FieldError>,
}

impl ShapeError {
    /// Create an unknown shape error
    pub fn unknown_shape(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: ShapeErrorCode::UnknownShape,
            message: format!("Shape '{}' not found", name),
            shape: Some(name),
            source: None,
        }
    }

    /// Create an error for a malformed shape file or definition
    pub fn malformed_shape(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: ShapeErrorCode::MalformedShape,
            message: format!("Malformed shape '{}': {}", source.into(), reason.into()),
            shape: None,
            source: None,
        }
    }

    /// Create an error for a field model failure inside a shape
    pub fn invalid_field(source: impl Into<String>, error: FieldError) -> Self {
        let mut err = Self::malformed_shape(source, format!("field model error: {}", error));
        err.source = Some(error);
        err
    }

    /// Create a shape immutable error
    pub fn shape_immutable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: ShapeErrorCode::ShapeImmutable,
            message: format!("Shape '{}' is already registered", name),
            shape: Some(name),
            source: None,
        }
    }

    pub fn code(&self) -> ShapeErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the shape name if applicable
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Field model failure behind a malformed shape, if any
    pub fn field_error(&self) -> Option<&FieldError> {
        self.source.as_ref()
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
