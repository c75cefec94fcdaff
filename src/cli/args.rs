//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Load an explicit config file
//! - `--debug`: Enable debug logging
//! - `--json`: Machine-readable output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// modpath - path filters, dependency visibility and layered module paths
#[derive(Parser, Debug)]
#[command(name = "modpath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load this config file on top of the global one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve layered module roots into an ordered search path
    #[command(
        name = "path",
        long_about = "Resolve layered module roots into an ordered search path.\n\n\
            Each root is searched first, followed by its layers in configured order. \
            Every layer and add-on is preceded by its overlays, so patches shadow the \
            content they patch.",
        after_help = "\
EXAMPLES:
    # Print the search path of one module root
    modpath path /opt/server/modules

    # Several roots, searched in the given order
    modpath path ./local-modules /opt/server/modules

LAYOUT:
    <root>/layers.conf              layers=top,base
    <root>/layers/<name>/           one directory per layer
    <root>/layers/<name>/.overlays/.overlays
                                    overlay names, preferred first
    <root>/add-ons/<name>/          only used when layers/ exists"
    )]
    Path {
        /// Module roots, highest precedence first
        #[arg(required = true, value_name = "ROOT")]
        roots: Vec<PathBuf>,
    },

    /// Test paths against a glob
    #[command(
        name = "match",
        after_help = "\
EXAMPLES:
    # A bare name matches itself and everything below it
    modpath match foo foo foo/bar

    # A trailing wildcard excludes the prefix itself
    modpath match 'foo/**' foo foo/bar"
    )]
    Match {
        /// Glob pattern
        glob: String,

        /// Paths to test
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },

    /// Show the import and export filters of a module descriptor
    #[command(
        name = "edges",
        after_help = "\
EXAMPLES:
    # Show the derived filters of every dependency
    modpath edges module.toml

    # Check which paths cross each edge
    modpath edges module.toml --path com/acme/api --path META-INF/services/x.Y"
    )]
    Edges {
        /// Descriptor file (TOML)
        descriptor: PathBuf,

        /// Evaluate the filters against these paths
        #[arg(long = "path", value_name = "PATH")]
        paths: Vec<String>,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
