//! CLI module for ntshape
//!
//! Provides command-line interface for:
//! - check: Compare two shape files
//! - validate: Compare a shape file with a registered shape
//! - normative: Compare a shape file with a built-in normative type
//! - list: Show registered shapes

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, NormativeKind, OutputFormat};
pub use commands::{
    check, check_files, check_normative, list, normative, registered_shapes, run, run_command,
    validate, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_shape_file, render_text, result_json, write_response};
