//! Command-line interface for strictly_wordle.

use clap::{Args, Parser, Subcommand};
use strictly_wordle::GameMode;

/// Strictly Wordle - play a solver-backed word game in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_wordle")]
#[command(about = "Terminal client for a solver-backed word game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every subcommand; each overrides the config file.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Scoring service URL
    #[arg(long)]
    pub server_url: Option<String>,

    /// Which puzzle to start
    #[arg(short, long, value_enum)]
    pub mode: Option<GameMode>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Play {
        #[command(flatten)]
        connect: ConnectArgs,

        /// Log file path
        #[arg(long)]
        log_file: Option<std::path::PathBuf>,
    },

    /// Play on plain stdin/stdout
    Line {
        #[command(flatten)]
        connect: ConnectArgs,
    },

    /// Check that the scoring service is reachable
    Check {
        #[command(flatten)]
        connect: ConnectArgs,

        /// Number of attempts before giving up
        #[arg(long, default_value = "1")]
        attempts: u32,
    },
}
