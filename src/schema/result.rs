//! Validation outcome types
//!
//! A `ValidationResult` is valid exactly when it holds no errors. Errors keep
//! the order in which the walk produced them.

use serde::Serialize;
use std::fmt;

/// Marker used in human-readable output for the empty (root) path
pub const ROOT_PATH: &str = "<root>";

/// Kinds of compatibility failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required reference field is absent from the candidate
    MissingField,
    /// Kind mismatch, or a nested failure re-reported at its containing field
    IncorrectType,
    /// A union alternative at a shared position has a different name
    MismatchedName,
    /// The declared type id does not name the expected normative type
    IncorrectId,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::IncorrectType => "incorrect_type",
            ErrorKind::MismatchedName => "mismatched_name",
            ErrorKind::IncorrectId => "incorrect_id",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single path-qualified compatibility failure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationError {
    /// Dotted path on the candidate side
    pub path: String,
    /// Dotted path on the reference side (differs only for mismatched names)
    pub ref_path: String,
    pub kind: ErrorKind,
}

impl ValidationError {
    /// Error whose candidate and reference paths coincide
    pub fn new(path: impl Into<String>, kind: ErrorKind) -> Self {
        let path = path.into();
        Self {
            ref_path: path.clone(),
            path,
            kind,
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::MissingField)
    }

    pub fn incorrect_type(path: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::IncorrectType)
    }

    pub fn incorrect_id(path: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::IncorrectId)
    }

    pub fn mismatched_name(ref_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ref_path: ref_path.into(),
            kind: ErrorKind::MismatchedName,
        }
    }

    /// Candidate path with the root marker substituted for the empty path
    pub fn display_path(&self) -> &str {
        display(&self.path)
    }

    /// Reference path with the root marker substituted for the empty path
    pub fn display_ref_path(&self) -> &str {
        display(&self.ref_path)
    }
}

fn display(path: &str) -> &str {
    if path.is_empty() {
        ROOT_PATH
    } else {
        path
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::MissingField => write!(f, "Missing field '{}'", self.display_ref_path()),
            ErrorKind::IncorrectType => {
                write!(f, "Field '{}' has incorrect type", self.display_ref_path())
            }
            ErrorKind::MismatchedName => write!(
                f,
                "Expected field '{}' in Union, got '{}'",
                self.display_ref_path(),
                self.display_path()
            ),
            ErrorKind::IncorrectId => {
                write!(f, "Field '{}' has incorrect ID", self.display_ref_path())
            }
        }
    }
}

/// Outcome of one validation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no errors were recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends all errors of `other`, keeping their order
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Clears the result for reuse
    pub fn reset(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }

    /// True if any error has the given kind
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Result(valid={}, errors=[", self.is_valid())?;
        for error in &self.errors {
            write!(f, " {}", error)?;
        }
        if !self.errors.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "])")
    }
}
