//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls into the library to do the work
//! 3. Formats and displays output, as text or JSON
//!
//! Handlers never touch the filesystem layout themselves; layered roots are
//! read through [`crate::layers`].

mod completion;
mod config_cmd;
mod edges;
mod match_cmd;
mod path_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::config;
pub use edges::edges;
pub use match_cmd::match_paths;
pub use path_cmd::path;

use super::Context;
use crate::cli::args::Command;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Path { roots } => path_cmd::path(ctx, &roots),
        Command::Match { glob, paths } => match_cmd::match_paths(ctx, &glob, &paths),
        Command::Edges { descriptor, paths } => edges::edges(ctx, &descriptor, &paths),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
