//! CLI argument definitions using clap
//!
//! Commands:
//! - ntshape check --reference <file> --candidate <file>
//! - ntshape validate --config <path> --shape <name> --candidate <file>
//! - ntshape normative --type <nt> --candidate <file>
//! - ntshape list --config <path>

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ntshape - structural compatibility checks for field-tree shapes
#[derive(Parser, Debug)]
#[command(name = "ntshape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a candidate shape file against a reference shape file
    Check {
        /// Reference shape file; its optional members may be omitted
        #[arg(long)]
        reference: PathBuf,

        /// Candidate shape file
        #[arg(long)]
        candidate: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a candidate against a named shape from the shape directory
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./ntshape.json")]
        config: PathBuf,

        /// Registered shape name
        #[arg(long)]
        shape: String,

        /// Candidate shape file
        #[arg(long)]
        candidate: PathBuf,
    },

    /// Check a candidate against a built-in normative type
    Normative {
        /// Normative type to check against
        #[arg(long = "type", value_enum)]
        nt: NormativeKind,

        /// Candidate shape file
        #[arg(long)]
        candidate: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the shapes of the shape directory
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./ntshape.json")]
        config: PathBuf,
    },
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Built-in normative types selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormativeKind {
    #[value(name = "NTScalar")]
    Scalar,
    #[value(name = "NTScalarArray")]
    ScalarArray,
    #[value(name = "NTEnum")]
    Enum,
    #[value(name = "NTTable")]
    Table,
    #[value(name = "NTAttribute")]
    Attribute,
    #[value(name = "NTNDArray")]
    NdArray,
    #[value(name = "NTNameValue")]
    NameValue,
    #[value(name = "NTMultiChannel")]
    MultiChannel,
    #[value(name = "NTUnion")]
    Union,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
