//! File input and stdout output for the CLI
//!
//! - Input: shape files (UTF-8 JSON)
//! - Output: one JSON object per command, or plain text lines

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::schema::{ShapeFile, ValidationResult};

use super::args::OutputFormat;
use super::errors::{CliError, CliResult};

/// Read and parse a shape file
pub fn read_shape_file(path: &Path) -> CliResult<ShapeFile> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    let file: ShapeFile = serde_json::from_str(&content)
        .map_err(|e| CliError::io_error(format!("Invalid shape file {}: {}", path.display(), e)))?;

    Ok(file)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Renders a validation result as plain text, one error per line
pub fn render_text(result: &ValidationResult) -> String {
    if result.is_valid() {
        return "compatible\n".to_string();
    }

    let mut out = format!("incompatible: {} error(s)\n", result.len());
    for error in result.errors() {
        out.push_str("  ");
        out.push_str(&error.to_string());
        out.push('\n');
    }
    out
}

/// JSON body describing a validation result
pub fn result_json(result: &ValidationResult) -> Value {
    let messages: Vec<String> = result.errors().iter().map(ToString::to_string).collect();
    json!({
        "valid": result.is_valid(),
        "errors": result.errors(),
        "messages": messages,
    })
}

/// Write a validation result in the requested format
pub fn write_result(format: OutputFormat, result: &ValidationResult) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_response(result_json(result)),
        OutputFormat::Text => {
            let mut stdout = io::stdout();
            write!(stdout, "{}", render_text(result))?;
            stdout.flush()?;
            Ok(())
        }
    }
}
