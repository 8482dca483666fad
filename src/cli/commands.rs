//! CLI command implementations
//!
//! Each command parses its inputs, runs one validation and writes the
//! outcome to stdout. An incompatible candidate is reported on stdout and
//! then returned as an `NT_CLI_INCOMPATIBLE` error so the exit status is
//! non-zero.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::field::FieldPtr;
use crate::normative::{
    NormativeType, NtAttribute, NtEnum, NtMultiChannel, NtNameValue, NtNdArray, NtScalar,
    NtScalarArray, NtTable, NtUnion,
};
use crate::observability::{self, Event};
use crate::schema::{ShapeRegistry, ValidationResult};

use super::args::{Command, NormativeKind, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{read_shape_file, write_response, write_result};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration file structure (`ntshape.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of shape files (optional, default "./shapes")
    #[serde(default = "default_shape_dir")]
    pub shape_dir: String,

    /// Output format (optional, default "text")
    #[serde(default)]
    pub output: OutputFormat,

    /// Log level when RUST_LOG is unset (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_shape_dir() -> String {
    "./shapes".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shape_dir: default_shape_dir(),
            output: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.shape_dir.trim().is_empty() {
            return Err(CliError::config_error("shape_dir must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Get shape directory as Path
    pub fn shape_path(&self) -> &Path {
        Path::new(&self.shape_dir)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check {
            reference,
            candidate,
            format,
        } => {
            observability::init_logging(&default_log_level());
            check(&reference, &candidate, format)
        }
        Command::Validate {
            config,
            shape,
            candidate,
        } => {
            let config = load_config(&config)?;
            validate(&config, &shape, &candidate)
        }
        Command::Normative {
            nt,
            candidate,
            format,
        } => {
            observability::init_logging(&default_log_level());
            normative(nt, &candidate, format)
        }
        Command::List { config } => {
            let config = load_config(&config)?;
            list(&config)
        }
    }
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    observability::init_logging(&config.log_level);
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %path.display(),
        shape_dir = %config.shape_dir,
        "configuration loaded"
    );
    Ok(config)
}

/// Builds the node described by a candidate shape file.
///
/// Optional markers in a candidate file have no meaning and are ignored.
fn load_candidate(path: &Path) -> CliResult<FieldPtr> {
    let file = read_shape_file(path)?;
    let definition = file.to_definition()?;
    Ok(Arc::clone(definition.reference()))
}

/// Validates one shape file against another without writing output
pub fn check_files(reference: &Path, candidate: &Path) -> CliResult<ValidationResult> {
    let definition = read_shape_file(reference)?.to_definition()?;
    let candidate = load_candidate(candidate)?;
    Ok(crate::schema::validate(&definition, &candidate))
}

/// Validates a shape file against a built-in normative type
pub fn check_normative(nt: NormativeKind, candidate: &Path) -> CliResult<ValidationResult> {
    let candidate = load_candidate(candidate)?;
    let result = match nt {
        NormativeKind::Scalar => NtScalar::validate(&candidate),
        NormativeKind::ScalarArray => NtScalarArray::validate(&candidate),
        NormativeKind::Enum => NtEnum::validate(&candidate),
        NormativeKind::Table => NtTable::validate(&candidate),
        NormativeKind::Attribute => NtAttribute::validate(&candidate),
        NormativeKind::NdArray => NtNdArray::validate(&candidate),
        NormativeKind::NameValue => NtNameValue::validate(&candidate),
        NormativeKind::MultiChannel => NtMultiChannel::validate(&candidate),
        NormativeKind::Union => NtUnion::validate(&candidate),
    };
    Ok(result)
}

fn finish(format: OutputFormat, result: ValidationResult) -> CliResult<()> {
    tracing::info!(
        event = %Event::CheckComplete,
        valid = result.is_valid(),
        errors = result.len(),
        "check complete"
    );

    write_result(format, &result)?;

    if result.is_valid() {
        Ok(())
    } else {
        Err(CliError::incompatible(result.len()))
    }
}

/// Check a candidate shape file against a reference shape file
pub fn check(reference: &Path, candidate: &Path, format: OutputFormat) -> CliResult<()> {
    let result = check_files(reference, candidate)?;
    finish(format, result)
}

/// Check a candidate against a registered shape
pub fn validate(config: &Config, shape: &str, candidate: &Path) -> CliResult<()> {
    let mut registry = ShapeRegistry::new(config.shape_path());
    registry.load_all()?;

    let candidate = load_candidate(candidate)?;
    let result = registry.validate(shape, &candidate)?;
    finish(config.output, result)
}

/// Check a candidate against a normative type
pub fn normative(nt: NormativeKind, candidate: &Path, format: OutputFormat) -> CliResult<()> {
    let result = check_normative(nt, candidate)?;
    finish(format, result)
}

/// List registered shape names
pub fn list(config: &Config) -> CliResult<()> {
    let names = registered_shapes(config)?;

    match config.output {
        OutputFormat::Json => write_response(json!({ "shapes": names })),
        OutputFormat::Text => {
            for name in &names {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Shape names found in the configured directory, sorted
pub fn registered_shapes(config: &Config) -> CliResult<Vec<String>> {
    let mut registry = ShapeRegistry::new(config.shape_path());
    registry.load_all()?;
    Ok(registry.names().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use crate::schema::ErrorKind;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_json(dir: &TempDir, name: &str, value: Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn record(value_type: &str) -> Value {
        json!({
            "name": "record",
            "shape": {
                "type": "structure",
                "fields": [
                    { "name": "value", "type": value_type, "scalar_type": "double" },
                    { "name": "descriptor", "type": "scalar", "scalar_type": "string", "optional": true }
                ]
            }
        })
    }

    fn create_config(dir: &TempDir) -> PathBuf {
        let shape_dir = dir.path().join("shapes");
        write_json(
            dir,
            "ntshape.json",
            json!({ "shape_dir": shape_dir.to_string_lossy() }),
        )
    }

    #[test]
    fn test_check_files_compatible() {
        let dir = TempDir::new().unwrap();
        let reference = write_json(&dir, "ref.json", record("scalar"));
        let candidate = write_json(
            &dir,
            "cand.json",
            json!({
                "name": "cand",
                "shape": {
                    "type": "structure",
                    "fields": [{ "name": "value", "type": "scalar", "scalar_type": "int" }]
                }
            }),
        );

        assert!(check_files(&reference, &candidate).unwrap().is_valid());
    }

    #[test]
    fn test_check_files_array_mismatch() {
        let dir = TempDir::new().unwrap();
        let reference = write_json(&dir, "ref.json", record("scalar"));
        let candidate = write_json(&dir, "cand.json", record("scalar_array"));

        let result = check_files(&reference, &candidate).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::IncorrectType);
        assert_eq!(result.errors()[0].path, "value");
    }

    #[test]
    fn test_check_reports_incompatible() {
        let dir = TempDir::new().unwrap();
        let reference = write_json(&dir, "ref.json", record("scalar"));
        let candidate = write_json(&dir, "cand.json", record("scalar_array"));

        let err = check(&reference, &candidate, OutputFormat::Json).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::Incompatible);
    }

    #[test]
    fn test_check_normative() {
        let dir = TempDir::new().unwrap();
        let candidate = write_json(
            &dir,
            "cand.json",
            json!({
                "name": "scalar",
                "shape": {
                    "type": "structure",
                    "id": "epics:nt/NTScalar:1.1",
                    "fields": [{ "name": "value", "type": "scalar", "scalar_type": "double" }]
                }
            }),
        );

        assert!(check_normative(NormativeKind::Scalar, &candidate).unwrap().is_valid());

        let result = check_normative(NormativeKind::ScalarArray, &candidate).unwrap();
        assert!(result.has_kind(ErrorKind::IncorrectType));
        assert!(result.has_kind(ErrorKind::IncorrectId));
    }

    #[test]
    fn test_check_normative_multi_channel() {
        let dir = TempDir::new().unwrap();
        let candidate = write_json(
            &dir,
            "cand.json",
            json!({
                "name": "channels",
                "shape": {
                    "type": "structure",
                    "id": "epics:nt/NTMultiChannel:1.0",
                    "fields": [
                        {
                            "name": "value",
                            "type": "union_array",
                            "element": {
                                "type": "union",
                                "fields": [
                                    { "name": "doubleValue", "type": "scalar", "scalar_type": "double" },
                                    { "name": "intValue", "type": "scalar", "scalar_type": "int" }
                                ]
                            }
                        },
                        { "name": "channelName", "type": "scalar_array", "scalar_type": "string" },
                        { "name": "severity", "type": "scalar_array", "scalar_type": "int" }
                    ]
                }
            }),
        );

        assert!(check_normative(NormativeKind::MultiChannel, &candidate).unwrap().is_valid());

        let result = check_normative(NormativeKind::Union, &candidate).unwrap();
        assert!(result.has_kind(ErrorKind::IncorrectType));
        assert!(result.has_kind(ErrorKind::IncorrectId));
    }

    #[test]
    fn test_registered_shapes() {
        let dir = TempDir::new().unwrap();
        let config_path = create_config(&dir);
        let config = Config::load(&config_path).unwrap();

        // Missing directory is created and empty.
        assert!(registered_shapes(&config).unwrap().is_empty());

        let shape = record("scalar")["shape"].clone();
        write_json(&dir, "shapes/b.json", json!({ "name": "beta", "shape": shape }));
        write_json(&dir, "shapes/a.json", json!({ "name": "alpha", "shape": shape }));

        assert_eq!(registered_shapes(&config).unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_validate_unknown_shape() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&create_config(&dir)).unwrap();
        let candidate = write_json(&dir, "cand.json", record("scalar"));

        let err = validate(&config, "nope", &candidate).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ShapeError);
    }

    #[test]
    fn test_config_defaults() {
        let dir = TempDir::new().unwrap();
        let config_path = write_json(&dir, "ntshape.json", json!({}));

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.shape_dir, "./shapes");
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_validates_log_level() {
        let dir = TempDir::new().unwrap();
        let config_path = write_json(&dir, "ntshape.json", json!({ "log_level": "loud" }));

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_unknown_output() {
        let dir = TempDir::new().unwrap();
        let config_path = write_json(&dir, "ntshape.json", json!({ "output": "yaml" }));

        assert!(Config::load(&config_path).is_err());
    }
}
