//! Errors raised when a move is rejected.

use super::Position;

/// Error that can occur when applying a move.
///
/// Every variant is recoverable: the caller ignores the input and the game
/// state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    OccupiedCell(Position),

    /// The index does not name a square.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The game is already over; reset before playing again.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
