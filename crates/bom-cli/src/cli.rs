//! CLI argument definitions for bomgroup.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bomgroup",
    version,
    about = "Organize BOM component records into purchasable line items",
    long_about = "Organize component records extracted from schematics into groups of\n\
                  identical parts.\n\n\
                  Normalizes field names, drops DNP and other-variant parts, splits\n\
                  multi-code designators into sub-parts, groups identical components\n\
                  and orders the groups by reference prefix."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Group the components of a parsed record set.
    Organize(OrganizeArgs),

    /// Expand a designator list such as `R1-R4,C7/8`.
    Expand(ExpandArgs),

    /// Collapse designators into a compact list.
    Collapse(CollapseArgs),
}

#[derive(Parser)]
pub struct OrganizeArgs {
    /// Record set to organize (.json object of designator → fields, or .csv).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with organization options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Active variant pattern (overrides the config file).
    #[arg(long = "variant", value_name = "PATTERN")]
    pub variant: Option<String>,

    /// Field merged into one text instead of splitting groups.
    ///
    /// May be repeated or given as a comma-separated list. Adds to the
    /// fields of the config file.
    #[arg(long = "merge", value_name = "FIELD", value_delimiter = ',')]
    pub merge: Vec<String>,

    /// Comma-separated reference prefixes giving the group order.
    #[arg(long = "bom-order", value_name = "LIST")]
    pub bom_order: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ExpandArgs {
    /// Designator list text.
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Parser)]
pub struct CollapseArgs {
    /// Designators to collapse.
    #[arg(value_name = "REF", required = true)]
    pub refs: Vec<String>,
}

/// Output format choices for organized groups.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
