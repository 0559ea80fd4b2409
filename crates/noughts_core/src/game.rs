//! Game state engine for tic-tac-toe.

use super::action::MoveError;
use super::outcome::GameOutcome;
use super::rules;
use super::types::{Board, Mode, Player, Score, Square};
use super::Position;
use tracing::{debug, info, instrument};

/// Mark played by the search in [`Mode::HumanVsAi`].
pub const AI_PLAYER: Player = Player::O;

/// Mark played by the human in [`Mode::HumanVsAi`].
pub const HUMAN_PLAYER: Player = Player::X;

/// Board, turn, score tally and mode for one session.
///
/// This is the only type that writes to the board. A finished game (win or
/// draw) accepts no further moves until [`GameState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    score: Score,
    mode: Mode,
    terminal: bool,
}

impl GameState {
    /// Creates a fresh session: empty board, X to move, zero score.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            score: Score::default(),
            mode,
            terminal: false,
        }
    }

    pub(crate) fn from_parts(board: Board, current_player: Player, score: Score, mode: Mode) -> Self {
        let terminal = rules::evaluate(&board).is_terminal();
        Self {
            board,
            current_player,
            score,
            mode,
            terminal,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (the winner, once a game is won).
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the score tally.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Returns the game mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True once the game has been won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True when the search should supply the next move.
    pub fn ai_to_move(&self) -> bool {
        self.mode == Mode::HumanVsAi && self.current_player == AI_PLAYER && !self.terminal
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// A win scores one point for the mover. After a win or a draw the
    /// current player stays on the mover; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game already finished.
    /// - [`MoveError::OutOfRange`] if `index` is not 0-8.
    /// - [`MoveError::OccupiedCell`] if the square is taken.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<GameOutcome, MoveError> {
        if self.terminal {
            return Err(MoveError::GameOver);
        }

        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;

        if !self.board.is_empty(pos) {
            return Err(MoveError::OccupiedCell(pos));
        }

        let mover = self.current_player;
        self.board.set(pos, Square::Occupied(mover));

        let outcome = rules::outcome_after_move(&self.board, mover);
        match &outcome {
            GameOutcome::Win { player, lines } => {
                self.score.record_win(*player);
                self.terminal = true;
                info!(winner = %player, lines = lines.len(), score = %self.score, "Game won");
            }
            GameOutcome::Draw => {
                self.terminal = true;
                info!("Game drawn");
            }
            GameOutcome::Ongoing => {
                self.current_player = mover.opponent();
                debug!(position = %pos, next = %self.current_player, "Move applied");
            }
        }

        debug_assert!(self.board.has_valid_parity(), "Board parity violated");
        Ok(outcome)
    }

    /// Clears the board and gives the move to X. Score and mode are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting board");
        self.board = Board::new();
        self.current_player = Player::X;
        self.terminal = false;
    }

    /// Switches mode and starts a fresh board.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        info!(from = %self.mode, to = %mode, "Changing mode");
        self.mode = mode;
        self.reset();
    }

    /// Clears the score tally. The board is left alone.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) {
        info!(previous = %self.score, "Clearing score");
        self.score = Score::default();
    }

    /// Recomputes the outcome from the board.
    pub fn current_outcome(&self) -> GameOutcome {
        rules::evaluate(&self.board)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
