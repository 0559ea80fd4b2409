//! Outcome of a board position.

use super::rules::Line;
use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of the current board.
///
/// Always derived from the board, never stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No line is complete and at least one square is empty.
    Ongoing,
    /// A player owns one or more lines.
    Win {
        /// The player owning the lines.
        player: Player,
        /// Every line the player owns, for highlighting.
        lines: Vec<Line>,
    },
    /// The board is full and no line is complete.
    Draw,
}

impl GameOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Winning lines, empty unless this is a win.
    pub fn lines(&self) -> &[Line] {
        match self {
            GameOutcome::Win { lines, .. } => lines,
            _ => &[],
        }
    }

    /// Returns true if the game was won.
    pub fn is_win(&self) -> bool {
        matches!(self, GameOutcome::Win { .. })
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }

    /// Returns true for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "In progress"),
            GameOutcome::Win { player, .. } => write!(f, "{} has won!", player),
            GameOutcome::Draw => write!(f, "It's a draw!"),
        }
    }
}
