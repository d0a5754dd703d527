//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use check::CheckArgs;

/// vaultprobe - confirm credentials can read a Vault secret, without reading it.
#[derive(Parser)]
#[command(
    name = "vaultprobe",
    about = "Confirm credentials can read a Vault secret, without reading it",
    version,
    after_help = "Exit codes: 0 granted, 1 usage/config error, 2 denied,\n\
                  3 authentication failed, 4 resolution failed, 5 transport error"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to the config file (default: .vaultprobe.toml)
    #[arg(long, global = true, env = "VAULTPROBE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate read access to a secret location
    Check(CheckArgs),

    /// Resolve an environment's credentials without contacting the store
    Resolve {
        /// Environment identifier (e.g., QA13)
        #[arg(short, long = "env")]
        environment: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command, returning the process exit code.
pub fn execute(command: Command, config: Option<&Path>) -> crate::error::Result<u8> {
    use Command::*;

    match command {
        Check(args) => check::execute(args, config),
        Resolve { environment, json } => resolve::execute(&environment, json, config),
        Completions { shell } => completions::execute(shell).map(|()| 0),
    }
}
