//! Command-line interface for strictly_tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_tictactoe::{Difficulty, GameMode};

/// Strictly Tic-Tac-Toe - icon tic-tac-toe with a computer opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe with icon marks and a heuristic computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Skip mode selection (single or multi)
        #[arg(long)]
        mode: Option<GameMode>,

        /// Computer difficulty for single-player (easy or hard)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed, overriding the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Computer thinking delay in milliseconds, overriding the config file
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}
