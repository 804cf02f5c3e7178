//! Command-line interface.

pub mod check;
pub mod output;
pub mod plan;
pub mod spread;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::Config;

/// Scopespread - untangle scoped secrets in a deployment space.
#[derive(Parser)]
#[command(
    name = "scopespread",
    about = "Spread scoped, name-colliding secrets into unique unscoped ones",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./.scopespread.toml
    #[arg(long, global = true, env = "SCOPESPREAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Rename and unscope every ambiguous secret, leaving scoped references
    Spread {
        /// Operate on a JSON space snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Reuse references left behind by an interrupted run
        #[arg(long)]
        resume_partial: bool,
    },

    /// Show what spread would do without writing anything
    Plan {
        /// Operate on a JSON space snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Report secrets that are still scoped or share a name
    Check {
        /// Operate on a JSON space snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

/// Execute a command.
pub fn execute(command: Command, config_path: Option<&Path>) -> crate::error::Result<()> {
    let config = Config::load(config_path)?;

    match command {
        Command::Spread {
            snapshot,
            yes,
            resume_partial,
        } => spread::execute(&config, snapshot.as_deref(), yes, resume_partial),
        Command::Plan { snapshot } => plan::execute(&config, snapshot.as_deref()),
        Command::Check { snapshot } => check::execute(&config, snapshot.as_deref()),
    }
}
