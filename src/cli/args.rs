//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Only log errors

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitversion - Derive a project version from git tags
#[derive(Parser, Debug)]
#[command(name = "gitversion")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Version of the whole repository
    gitversion

    # Only tags like v1.2.3, dirtiness scoped to one module
    gitversion --prefix v --sub-dir modules/api

    # Everything known about the evaluation
    gitversion --json")]
pub struct Cli {
    /// Run as if gitversion was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Flags controlling the evaluation. They override config files.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct EvaluationArgs {
    /// Only changes under this directory make the version a snapshot
    #[arg(long, value_name = "PATH")]
    pub sub_dir: Option<PathBuf>,

    /// Regex prepended to the tag pattern (e.g. "v" or "^api-")
    #[arg(long, value_name = "REGEX")]
    pub prefix: Option<String>,

    /// Replace the tag pattern; capture group 1 is the version
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Tag processor to use (see `gitversion processors`)
    #[arg(long, value_name = "NAME")]
    pub processor: Option<String>,

    /// Development suffix for the maven processor
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available tag processors
    #[command(name = "processors")]
    Processors,
}
