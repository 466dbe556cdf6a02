//! Command-line interface for strictly_solitaire.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Solitaire - Klondike with saved games, undo and replay
#[derive(Parser, Debug)]
#[command(name = "strictly_solitaire")]
#[command(about = "Klondike solitaire in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "solitaire.toml")]
    pub config: PathBuf,

    /// Override the database path from the config
    #[arg(long)]
    pub db_path: Option<String>,

    /// Keep saved games in memory only (nothing survives the process)
    #[arg(long)]
    pub memory: bool,

    /// Override the pause between replayed moves, in milliseconds
    #[arg(long)]
    pub replay_delay_ms: Option<u64>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play interactively, reading commands from stdin
    Play,

    /// Print the saved game without playing
    Show,

    /// Delete the saved game
    Reset,
}
