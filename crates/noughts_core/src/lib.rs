//! Tic-tac-toe rules engine with an exhaustive minimax opponent.
//!
//! # Architecture
//!
//! - **GameState**: board, player to move, score tally and mode; the only
//!   writer of the board
//! - **Rules**: pure win/draw evaluation over board snapshots
//! - **Search**: full-depth minimax picking the AI's move
//! - **SavedGame**: serializable session with normalization on load
//!
//! # Example
//!
//! ```
//! use noughts_core::{find_best_move, GameState, Mode, AI_PLAYER, HUMAN_PLAYER};
//!
//! let mut game = GameState::new(Mode::HumanVsAi);
//! game.apply_move(4).unwrap();
//! assert!(game.ai_to_move());
//!
//! let reply = find_best_move(game.board(), AI_PLAYER, HUMAN_PLAYER).unwrap();
//! assert!(reply.is_corner());
//! game.apply_move(reply.to_index()).unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod outcome;
mod position;
pub mod rules;
mod saved;
pub mod search;
mod types;

pub use action::MoveError;
pub use game::{AI_PLAYER, GameState, HUMAN_PLAYER};
pub use outcome::GameOutcome;
pub use position::Position;
pub use rules::{Line, WINNING_LINES};
pub use saved::{SavedGame, parse_board};
pub use search::{find_best_move, score_moves};
pub use types::{Board, Mode, Player, Score, Square};
