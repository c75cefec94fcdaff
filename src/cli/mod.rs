//! cli
//!
//! Command-line interface layer for modpath.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, loads the tool
//! configuration, and dispatches to a handler that calls into [`crate::core`]
//! and [`crate::layers`]. Library errors are wrapped with `anyhow` context
//! here and nowhere else.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Per-invocation state shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: Config,
    pub verbosity: Verbosity,
    /// Emit JSON instead of plain text.
    pub json: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    init_logging(verbosity);

    let loaded = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    // The flag can only turn JSON on; config supplies the default.
    let json = cli.json || loaded.config.json_output();

    let ctx = Context {
        config: loaded.config,
        verbosity,
        json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbosity: Verbosity) {
    let default = match verbosity {
        Verbosity::Quiet => "modpath=error",
        Verbosity::Normal => "modpath=info",
        Verbosity::Debug => "modpath=debug,info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed, keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_can_be_installed_twice() {
        init_logging(Verbosity::Debug);
        init_logging(Verbosity::Quiet);
        tracing::debug!("still logging after second install");
    }
}
