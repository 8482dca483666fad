//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::schema::ShapeError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Shape file or registry error
    ShapeError,
    /// Candidate is not compatible with the reference
    Incompatible,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "NT_CLI_CONFIG_ERROR",
            Self::IoError => "NT_CLI_IO_ERROR",
            Self::ShapeError => "NT_CLI_SHAPE_ERROR",
            Self::Incompatible => "NT_CLI_INCOMPATIBLE",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Candidate rejected with `errors` validation errors
    pub fn incompatible(errors: usize) -> Self {
        Self::new(
            CliErrorCode::Incompatible,
            format!("Candidate is not compatible ({} errors)", errors),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ShapeError> for CliError {
    fn from(e: ShapeError) -> Self {
        Self::new(CliErrorCode::ShapeError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::incompatible(3);
        assert_eq!(err.code(), &CliErrorCode::Incompatible);
        assert_eq!(err.to_string(), "NT_CLI_INCOMPATIBLE: Candidate is not compatible (3 errors)");
    }

    #[test]
    fn test_shape_error_conversion() {
        let err: CliError = ShapeError::unknown_shape("missing").into();
        assert_eq!(err.code_str(), "NT_CLI_SHAPE_ERROR");
        assert!(err.message().contains("NT_UNKNOWN_SHAPE"));
    }
}
