//! Command-line interface for noughts.

use clap::{Parser, ValueEnum};
use noughts_core::Mode;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Terminal tic-tac-toe with an unbeatable AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Opponent for this session (overrides the saved mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Save file (overrides the config)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Ignore the saved board and score
    #[arg(long)]
    pub fresh: bool,

    /// Clear the score tally before playing
    #[arg(long)]
    pub reset_score: bool,
}

/// Mode names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Two humans share the keyboard
    Human,
    /// Play X against the minimax search
    Ai,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => Mode::HumanVsHuman,
            ModeArg::Ai => Mode::HumanVsAi,
        }
    }
}
