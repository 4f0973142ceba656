//! CLI command definitions for the `charla` binary.
//!
//! Uses clap derive macros for argument parsing. Running with no
//! subcommand starts the interactive chat loop.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a self-hosted inference service from the terminal.
#[derive(Parser)]
#[command(name = "charla", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat {
        /// Model to use, overriding the persisted selection.
        #[arg(long)]
        model: Option<String>,

        /// Operating mode tag sent with every message, passed through
        /// to the service unmodified.
        #[arg(long, default_value = "general")]
        mode: String,
    },

    /// Service dashboard: health, catalog, session settings.
    Status,

    /// List selectable models and the current selection.
    Models,

    /// List past conversations, most recent first.
    History,

    /// Start a fresh conversation identity.
    Reset {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
