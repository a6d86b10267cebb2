//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration as needed
//! 2. Calls into [`crate::version`]
//! 3. Formats and displays output
//!
//! Handlers never modify the repository.

mod evaluate;
mod processors;

pub use evaluate::{evaluate, Settings};
pub use processors::processors;

use crate::cli::args::{Command, EvaluationArgs};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler. No subcommand evaluates the version.
pub fn dispatch(command: Option<Command>, args: &EvaluationArgs, ctx: &Context) -> Result<()> {
    match command {
        None => evaluate::evaluate(ctx, args),
        Some(Command::Processors) => processors::processors(),
    }
}
