//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. The engine and
//! the search both evaluate positions through this module.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Line, WINNING_LINES, has_line, lines_for};

use crate::{Board, GameOutcome, Player};

/// Outcome of the move `mover` just made.
///
/// Only the mover's lines count: a move cannot complete a line for the
/// opponent.
pub fn outcome_after_move(board: &Board, mover: Player) -> GameOutcome {
    let lines = lines_for(board, mover);
    if !lines.is_empty() {
        GameOutcome::Win {
            player: mover,
            lines,
        }
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// Outcome of an arbitrary board.
///
/// Both players are checked. If both hold a line (a board that cannot arise
/// from legal play) the player who moved last by piece parity is reported.
pub fn evaluate(board: &Board) -> GameOutcome {
    let last_mover = board.next_by_parity().opponent();
    let first = outcome_after_move(board, last_mover);
    if first.is_win() {
        return first;
    }
    let other = last_mover.opponent();
    let lines = lines_for(board, other);
    if lines.is_empty() {
        first
    } else {
        GameOutcome::Win {
            player: other,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    fn board_from(marks: &str) -> Board {
        let mut board = Board::new();
        for (pos, c) in Position::ALL.iter().zip(marks.chars()) {
            match c {
                'X' => board.set(*pos, Square::Occupied(Player::X)),
                'O' => board.set(*pos, Square::Occupied(Player::O)),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_outcome_after_move_ignores_opponent_line() {
        // O owns the middle row; X has just played elsewhere.
        let board = board_from("X.XOOOX..");
        assert_eq!(outcome_after_move(&board, Player::X), GameOutcome::Ongoing);
    }

    #[test]
    fn test_evaluate_reports_either_player() {
        let board = board_from("XX.OOO.X.");
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Player::O));
        assert_eq!(
            outcome.lines(),
            &[[Position::MiddleLeft, Position::Center, Position::MiddleRight]]
        );
    }

    #[test]
    fn test_evaluate_prefers_last_mover_on_double_ownership() {
        // Five X, four O: X moved last.
        let board = board_from("XXXOOO.X.");
        assert_eq!(evaluate(&board).winner(), Some(Player::X));
    }

    #[test]
    fn test_evaluate_draw_and_ongoing() {
        assert_eq!(evaluate(&board_from("XOXXOOOXX")), GameOutcome::Draw);
        assert_eq!(evaluate(&Board::new()), GameOutcome::Ongoing);
    }
}
