//! Application state and logic.

use crate::input::{Action, action_for};
use crate::orchestrator::{AiReply, AiRequest};
use crossterm::event::KeyCode;
use noughts_core::{AI_PLAYER, GameOutcome, GameState, Mode, Position};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
///
/// Holds the session plus everything the screen needs that the engine does
/// not track: cursor, status line, the outstanding AI request and when the
/// last game finished.
#[derive(Debug)]
pub struct App {
    game: GameState,
    cursor: Position,
    status_message: String,
    generation: u64,
    ai_pending: bool,
    queued_request: Option<AiRequest>,
    finished_at: Option<Instant>,
    auto_reset: Option<Duration>,
    dirty: bool,
}

impl App {
    /// Creates the application around a (possibly restored) session.
    pub fn new(game: GameState, auto_reset: Option<Duration>) -> Self {
        let mut app = Self {
            game,
            cursor: Position::Center,
            status_message: String::new(),
            generation: 0,
            ai_pending: false,
            queued_request: None,
            finished_at: None,
            auto_reset,
            dirty: false,
        };
        if app.game.is_terminal() {
            app.finished_at = Some(Instant::now());
            app.status_message = app.game.current_outcome().to_string();
        } else {
            app.refresh_turn_status();
        }
        app.queue_ai_if_due();
        app
    }

    /// Gets the current game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Gets the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while an AI move is outstanding.
    pub fn ai_pending(&self) -> bool {
        self.ai_pending
    }

    /// Takes the AI request queued since the last call.
    pub fn take_ai_request(&mut self) -> Option<AiRequest> {
        self.queued_request.take()
    }

    /// True once if the session changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Flow {
        let Some(action) = action_for(self.cursor, key) else {
            return Flow::Continue;
        };
        debug!(?action, "Handling action");

        match action {
            Action::Cursor(pos) => self.cursor = pos,
            Action::Place(pos) => {
                self.cursor = pos;
                self.place(pos);
            }
            Action::Reset => self.restart(),
            Action::ToggleMode => self.toggle_mode(),
            Action::ClearScore => self.clear_score(),
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Places the human's mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position) {
        if self.ai_pending {
            self.status_message = format!("{} is thinking...", AI_PLAYER);
            return;
        }
        self.apply(pos);
    }

    /// Applies a finished search if it still belongs to the current board.
    #[instrument(skip(self))]
    pub fn handle_ai_reply(&mut self, reply: AiReply) {
        if !self.ai_pending || reply.generation != self.generation {
            debug!(
                reply_generation = reply.generation,
                current = self.generation,
                "Discarding stale AI reply"
            );
            return;
        }
        self.ai_pending = false;

        match reply.position {
            Some(pos) => self.apply(pos),
            None => warn!("Search returned no move for a board in progress"),
        }
    }

    /// Clears a finished board once the auto-reset delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if let (Some(finished), Some(delay)) = (self.finished_at, self.auto_reset)
            && now.duration_since(finished) >= delay
        {
            debug!("Auto-reset after finished game");
            self.restart();
        }
    }

    /// Restarts the game, keeping score and mode.
    pub fn restart(&mut self) {
        self.game.reset();
        self.after_board_cleared();
    }

    /// Switches between human and AI opponent.
    pub fn toggle_mode(&mut self) {
        let mode = self.game.mode().toggled();
        self.game.set_mode(mode);
        self.after_board_cleared();
        info!(%mode, "Mode toggled");
    }

    /// Clears the score tally.
    pub fn clear_score(&mut self) {
        self.game.reset_score();
        self.dirty = true;
        self.status_message = "Score cleared.".to_string();
    }

    fn apply(&mut self, pos: Position) {
        match self.game.apply_move(pos.to_index()) {
            Ok(outcome) => {
                self.dirty = true;
                match outcome {
                    GameOutcome::Ongoing => {
                        self.refresh_turn_status();
                        self.queue_ai_if_due();
                    }
                    finished => {
                        self.status_message = finished.to_string();
                        self.finished_at = Some(Instant::now());
                    }
                }
            }
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.status_message = format!("{}.", e);
            }
        }
    }

    fn after_board_cleared(&mut self) {
        // Any search still running belongs to the old board.
        self.generation += 1;
        self.ai_pending = false;
        self.queued_request = None;
        self.finished_at = None;
        self.dirty = true;
        self.refresh_turn_status();
    }

    fn queue_ai_if_due(&mut self) {
        if self.game.ai_to_move() && !self.ai_pending {
            self.ai_pending = true;
            self.queued_request = Some(AiRequest {
                generation: self.generation,
                board: *self.game.board(),
            });
            self.status_message = format!("{} is thinking...", AI_PLAYER);
        }
    }

    fn refresh_turn_status(&mut self) {
        let player = self.game.current_player();
        self.status_message = match self.game.mode() {
            Mode::HumanVsHuman => format!("Player {}'s turn.", player),
            Mode::HumanVsAi => format!("Your move ({}).", player),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Player, SavedGame, Score};

    fn restored(board: &str, mode: Mode, score: Score) -> GameState {
        GameState::restore(SavedGame {
            board_state: board
                .chars()
                .map(|c| if c == '.' { String::new() } else { c.to_string() })
                .collect(),
            current_player: None,
            scores: score,
            game_mode: mode,
        })
    }

    fn ai_app() -> App {
        App::new(GameState::new(Mode::HumanVsAi), None)
    }

    #[test]
    fn test_human_move_queues_ai() {
        let mut app = ai_app();
        app.place(Position::Center);
        assert!(app.ai_pending());
        let request = app.take_ai_request().expect("request queued");
        assert_eq!(request.generation, 0);
        assert!(app.take_ai_request().is_none());
        assert!(app.take_dirty());
        assert!(!app.take_dirty());
    }

    #[test]
    fn test_input_blocked_while_ai_pending() {
        let mut app = ai_app();
        app.place(Position::Center);
        let before = *app.game().board();
        app.place(Position::TopLeft);
        assert_eq!(app.game().board(), &before);
        assert!(app.status_message().contains("thinking"));
    }

    #[test]
    fn test_reply_applied_then_turn_returns() {
        let mut app = ai_app();
        app.place(Position::Center);
        let request = app.take_ai_request().expect("request queued");
        app.handle_ai_reply(AiReply {
            generation: request.generation,
            position: Some(Position::TopLeft),
        });
        assert!(!app.ai_pending());
        assert_eq!(app.game().current_player(), Player::X);
        assert_eq!(app.game().board().count(Player::O), 1);
    }

    #[test]
    fn test_stale_reply_discarded_after_reset() {
        let mut app = ai_app();
        app.place(Position::Center);
        let request = app.take_ai_request().expect("request queued");
        app.restart();
        app.handle_ai_reply(AiReply {
            generation: request.generation,
            position: Some(Position::TopLeft),
        });
        assert_eq!(app.game().board().count(Player::O), 0);
        assert!(!app.ai_pending());
    }

    #[test]
    fn test_toggle_mode_resets_and_keeps_score() {
        let mut app = App::new(GameState::new(Mode::HumanVsHuman), None);
        for pos in [0, 3, 1, 4, 2] {
            app.place(Position::from_index(pos).expect("valid index"));
        }
        assert_eq!(app.game().score().wins(Player::X), 1);
        app.toggle_mode();
        assert_eq!(app.game().mode(), Mode::HumanVsAi);
        assert_eq!(app.game().board().count(Player::X), 0);
        assert_eq!(app.game().score().wins(Player::X), 1);
    }

    #[test]
    fn test_auto_reset_after_delay() {
        let mut app = App::new(GameState::new(Mode::HumanVsHuman), Some(Duration::from_millis(10)));
        for pos in [0, 3, 1, 4, 2] {
            app.place(Position::from_index(pos).expect("valid index"));
        }
        assert!(app.game().is_terminal());
        app.tick(Instant::now() + Duration::from_secs(1));
        assert!(!app.game().is_terminal());
        assert_eq!(app.game().score().wins(Player::X), 1);
    }

    #[test]
    fn test_restored_finished_board_auto_resets() {
        let game = restored("XXXOO....", Mode::HumanVsHuman, Score::new(1, 0));
        let mut app = App::new(game, Some(Duration::from_millis(10)));
        assert!(app.game().is_terminal());
        assert_eq!(app.status_message(), "X has won!");

        app.place(Position::MiddleRight);
        assert_eq!(app.game().board().count(Player::X), 3);

        app.tick(Instant::now() + Duration::from_secs(1));
        assert!(!app.game().is_terminal());
        assert_eq!(app.game().board().count(Player::X), 0);
        assert_eq!(app.game().score(), Score::new(1, 0));
    }

    #[test]
    fn test_restored_board_with_ai_to_move_queues_request() {
        let game = restored("....X....", Mode::HumanVsAi, Score::default());
        let mut app = App::new(game, None);
        assert!(app.ai_pending());
        let request = app.take_ai_request().expect("request queued");
        assert_eq!(request.generation, 0);
        assert_eq!(request.board, *app.game().board());

        app.handle_ai_reply(AiReply {
            generation: request.generation,
            position: Some(Position::TopLeft),
        });
        assert_eq!(app.game().board().count(Player::O), 1);
        assert_eq!(app.game().current_player(), Player::X);
    }

    #[test]
    fn test_quit_key() {
        let mut app = ai_app();
        assert_eq!(app.handle_key(KeyCode::Char('q')), Flow::Quit);
        assert_eq!(app.handle_key(KeyCode::Left), Flow::Continue);
        assert_eq!(app.cursor(), Position::MiddleLeft);
    }
}
