//! cli
//!
//! Command-line interface layer for gitversion.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Output
//!
//! stdout carries only the result (the version, JSON, or the processor
//! list). Logs go to stderr, filtered by `GITVERSION_LOG` (tracing
//! `EnvFilter` syntax, default `warn`); `--debug` and `--quiet` override it.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, EvaluationArgs};

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GITVERSION_LOG";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings, or whatever `GITVERSION_LOG` asks for
    Normal,
    /// Everything the engine reports at debug level
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Build the log filter for this verbosity.
    fn filter(self) -> EnvFilter {
        match self {
            Verbosity::Quiet => EnvFilter::new("error"),
            Verbosity::Debug => EnvFilter::new("gitversioning=debug"),
            Verbosity::Normal => {
                EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
            }
        }
    }
}

/// Execution context shared by command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
}

impl Context {
    /// The directory to run in, made absolute.
    pub fn cwd(&self) -> Result<PathBuf> {
        let current = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(match &self.cwd {
            Some(cwd) => current.join(cwd),
            None => current,
        })
    }
}

/// Install the stderr log subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(verbosity.filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    let ctx = Context {
        cwd: cli.cwd.clone(),
    };

    commands::dispatch(cli.command, &cli.evaluation, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn relative_cwd_is_made_absolute() {
        let ctx = Context {
            cwd: Some(PathBuf::from("some/dir")),
        };
        let cwd = ctx.cwd().unwrap();
        assert!(cwd.is_absolute());
        assert!(cwd.ends_with("some/dir"));
    }
}
