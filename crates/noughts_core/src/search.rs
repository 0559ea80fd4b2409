//! Exhaustive minimax search for the AI move.
//!
//! The 3x3 game tree is small enough to enumerate in full, so there is no
//! pruning, no depth limit and no transposition table. Scores are always
//! from the AI's point of view: +10 when the AI owns a line, -10 when the
//! human does, 0 for a full board.

use super::rules::{has_line, is_full};
use super::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Score of a position the AI has won.
pub const WIN_SCORE: i32 = 10;

/// Score of a position the human has won.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Score of a full board with no line.
pub const DRAW_SCORE: i32 = 0;

struct Minimax {
    ai: Player,
    human: Player,
    nodes: u64,
}

impl Minimax {
    fn new(ai: Player, human: Player) -> Self {
        debug_assert_ne!(ai, human, "AI and human must hold different marks");
        Self { ai, human, nodes: 0 }
    }

    /// Fixed-perspective score of a finished position, `None` while play continues.
    fn terminal_score(&self, board: &Board) -> Option<i32> {
        if has_line(board, self.ai) {
            Some(WIN_SCORE)
        } else if has_line(board, self.human) {
            Some(LOSS_SCORE)
        } else if is_full(board) {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    fn value(&mut self, board: &mut Board, ai_to_move: bool) -> i32 {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board) {
            return score;
        }

        let (mover, mut best) = if ai_to_move {
            (self.ai, i32::MIN)
        } else {
            (self.human, i32::MAX)
        };

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            board.set(pos, Square::Occupied(mover));
            let score = self.value(board, !ai_to_move);
            board.set(pos, Square::Empty);

            best = if ai_to_move {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

/// Minimax value of every legal AI move, in index order.
///
/// Empty when the board is already finished.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn score_moves(board: &Board, ai_player: Player, human_player: Player) -> Vec<(Position, i32)> {
    let mut search = Minimax::new(ai_player, human_player);
    if search.terminal_score(board).is_some() {
        return Vec::new();
    }

    let mut scratch = *board;
    let scores: Vec<(Position, i32)> = board
        .empty_positions()
        .map(|pos| {
            scratch.set(pos, Square::Occupied(ai_player));
            let score = search.value(&mut scratch, false);
            scratch.set(pos, Square::Empty);
            (pos, score)
        })
        .collect();

    debug!(nodes = search.nodes, ?scores, "Minimax search complete");
    scores
}

/// Picks the optimal move for `ai_player`.
///
/// Ties go to the lowest index. Returns `None` when the board has no empty
/// square or a line is already complete; callers only ask for a move while
/// the game is in progress, so `None` marks a caller bug.
#[instrument(skip(board))]
pub fn find_best_move(board: &Board, ai_player: Player, human_player: Player) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for (pos, score) in score_moves(board, ai_player, human_player) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    if let Some((pos, score)) = best {
        debug!(position = %pos, score, "AI chose position");
    }
    best.map(|(pos, _)| pos)
}
