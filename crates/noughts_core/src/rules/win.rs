//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};

/// Three positions that win when owned by one player.
pub type Line = [Position; 3];

/// Every winning line: rows, columns, then diagonals.
pub const WINNING_LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

fn owns(board: &Board, player: Player, line: &Line) -> bool {
    line.iter()
        .all(|pos| board.get(*pos) == Square::Occupied(player))
}

/// Checks whether `player` owns at least one line.
pub fn has_line(board: &Board, player: Player) -> bool {
    WINNING_LINES.iter().any(|line| owns(board, player, line))
}

/// Every line owned by `player`, in [`WINNING_LINES`] order.
pub fn lines_for(board: &Board, player: Player) -> Vec<Line> {
    WINNING_LINES
        .iter()
        .filter(|line| owns(board, player, line))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_line_empty_board() {
        let board = Board::new();
        assert!(!has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        board.set(Position::TopRight, Square::Occupied(Player::X));
        assert!(has_line(&board, Player::X));
        assert_eq!(lines_for(&board, Player::X), vec![WINNING_LINES[0]]);
        assert!(lines_for(&board, Player::O).is_empty());
    }

    #[test]
    fn test_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::O));
        board.set(Position::Center, Square::Occupied(Player::O));
        board.set(Position::BottomRight, Square::Occupied(Player::O));
        assert_eq!(lines_for(&board, Player::O), vec![WINNING_LINES[6]]);
    }

    #[test]
    fn test_incomplete_line() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        assert!(!has_line(&board, Player::X));
    }

    #[test]
    fn test_every_satisfied_line_reported() {
        // X: top row and left column share the corner.
        let mut board = Board::new();
        for pos in [
            Position::TopLeft,
            Position::TopCenter,
            Position::TopRight,
            Position::MiddleLeft,
            Position::BottomLeft,
        ] {
            board.set(pos, Square::Occupied(Player::X));
        }
        assert_eq!(
            lines_for(&board, Player::X),
            vec![WINNING_LINES[0], WINNING_LINES[3]]
        );
    }
}
