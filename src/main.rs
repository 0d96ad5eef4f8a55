//! Strictly Tic-Tac-Toe - terminal frontend.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_tictactoe::{console, Difficulty, GameConfig, GameMode, SessionDriver};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_tictactoe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            config,
            seed,
            delay_ms,
        } => run_play(mode, difficulty, config, seed, delay_ms).await,
    }
}

/// Run an interactive game on stdin/stdout
#[instrument]
async fn run_play(
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = delay_ms {
        config = config.with_computer_delay_ms(ms);
    }
    info!(?config, "Configuration resolved");

    let (driver, events) = SessionDriver::from_config(&config);
    if let Some(mode) = mode {
        driver.start_game(mode, difficulty);
    }

    console::run(driver, events).await
}
