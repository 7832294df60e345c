//! Strictly Wordle - Unified CLI
//!
//! Terminal client for a word game scored by a remote solver service.

#![warn(missing_docs)]

mod cli;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ConnectArgs};
use strictly_wordle::{GameController, HttpScoringClient, WordleConfig};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { connect, log_file } => run_play(connect, log_file).await,
        Command::Line { connect } => run_line(connect).await,
        Command::Check { connect, attempts } => run_check(connect, attempts).await,
    }
}

/// Builds the effective config: file and environment, then flags.
fn resolve_config(connect: &ConnectArgs) -> Result<WordleConfig> {
    let mut config = WordleConfig::load(connect.config.as_deref())?;
    if let Some(url) = &connect.server_url {
        config = config.with_server_url(url.clone());
    }
    if let Some(mode) = connect.mode {
        config = config.with_mode(mode);
    }
    if let Some(secs) = connect.timeout_secs {
        config = config.with_request_timeout_secs(secs);
    }
    config.validate()?;
    Ok(config)
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Run the terminal UI
async fn run_play(connect: ConnectArgs, log_file: Option<std::path::PathBuf>) -> Result<()> {
    let mut config = resolve_config(&connect)?;
    if let Some(path) = log_file {
        config = config.with_log_file(path);
    }
    strictly_wordle::tui::init_file_logging(config.log_file())?;
    strictly_wordle::tui::run_tui(config).await
}

/// Run the line-oriented game
async fn run_line(connect: ConnectArgs) -> Result<()> {
    init_stderr_logging();
    let config = resolve_config(&connect)?;
    info!(server_url = %config.server_url(), "Starting line mode");

    let client = HttpScoringClient::new(config.server_url().clone(), config.request_timeout())?;
    let mut controller = GameController::new(config.notice_lifetime(), config.request_timeout());

    let stdin = io::stdin();
    strictly_wordle::line::run_line(
        &client,
        &mut controller,
        *config.mode(),
        *config.suggestion_limit(),
        stdin.lock(),
        io::stdout(),
    )
    .await
}

/// Probe the service until it answers or the attempts run out
#[instrument(skip(connect))]
async fn run_check(connect: ConnectArgs, attempts: u32) -> Result<()> {
    init_stderr_logging();
    let config = resolve_config(&connect)?;
    let client = HttpScoringClient::new(config.server_url().clone(), config.request_timeout())?;

    for attempt in 1..=attempts.max(1) {
        match client.ping().await {
            Ok(message) => {
                println!("{} is reachable: {}", client.base_url(), message);
                return Ok(());
            }
            Err(e) => {
                warn!(attempt, error = %e, "Service check failed");
                if attempt < attempts {
                    debug!("Retrying");
                    sleep(Duration::from_millis(500)).await;
                } else {
                    anyhow::bail!("{} is not reachable: {}", client.base_url(), e);
                }
            }
        }
    }
    Ok(())
}
