//! Saved-game form of a session and its normalization on load.
//!
//! The field names follow the original browser storage keys so existing
//! saves keep loading. Anything that could not have come from legal play is
//! replaced by a fresh board rather than rejected outright.

use super::game::GameState;
use super::rules;
use super::types::{Board, Mode, Player, Score, Square};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument, warn};

/// Serializable session: board, player to move, score tally and mode.
///
/// Each field is read on its own: a value of the wrong shape falls back to
/// the field's default instead of failing the whole save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// Nine cells, each `""`, `"X"` or `"O"`.
    #[serde(default, deserialize_with = "or_default")]
    pub board_state: Vec<String>,
    /// `"X"` or `"O"`. Advisory only; recomputed from the board.
    #[serde(default, deserialize_with = "or_default")]
    pub current_player: Option<String>,
    /// Win tally.
    #[serde(default, deserialize_with = "or_default")]
    pub scores: Score,
    /// `"Human"` or `"AI"`.
    #[serde(default, deserialize_with = "or_default")]
    pub game_mode: Mode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => Ok(value),
        Lenient::Invalid(_) => {
            warn!(field = std::any::type_name::<T>(), "Ignoring malformed saved field");
            Ok(T::default())
        }
    }
}

fn parse_cell(cell: &str) -> Option<Square> {
    match cell {
        "" => Some(Square::Empty),
        "X" => Some(Square::Occupied(Player::X)),
        "O" => Some(Square::Occupied(Player::O)),
        _ => None,
    }
}

fn cell_text(square: Square) -> String {
    match square {
        Square::Empty => String::new(),
        Square::Occupied(player) => player.to_string(),
    }
}

/// Parses saved cells into a board reachable by legal play.
///
/// Rejects wrong lengths, unknown symbols, broken piece parity, lines for
/// both players, and a winner who was not the last to move.
pub fn parse_board(cells: &[String]) -> Option<Board> {
    let squares: Vec<Square> = cells.iter().map(|c| parse_cell(c)).collect::<Option<_>>()?;
    let squares: [Square; 9] = squares.try_into().ok()?;
    let board = Board::from_squares(squares);

    if !board.has_valid_parity() {
        return None;
    }

    let last_mover = board.next_by_parity().opponent();
    if rules::has_line(&board, last_mover.opponent()) {
        return None;
    }

    Some(board)
}

impl GameState {
    /// Rebuilds a session from saved data, normalizing anything malformed.
    ///
    /// The score and mode are taken as given. The board is kept only if it
    /// passes [`parse_board`]; the player to move and the finished flag are
    /// always derived from the board.
    #[instrument(skip(saved))]
    pub fn restore(saved: SavedGame) -> GameState {
        let board = match parse_board(&saved.board_state) {
            Some(board) => board,
            None => {
                if !saved.board_state.is_empty() {
                    warn!(cells = ?saved.board_state, "Discarding malformed saved board");
                }
                Board::new()
            }
        };

        let next = board.next_by_parity();
        let current_player = if rules::evaluate(&board).is_terminal() {
            next.opponent()
        } else {
            next
        };

        if let Some(supplied) = saved.current_player.as_deref()
            && supplied != current_player.to_string()
        {
            debug!(supplied, derived = %current_player, "Ignoring saved current player");
        }

        GameState::from_parts(board, current_player, saved.scores, saved.game_mode)
    }

    /// Captures the session for saving.
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            board_state: self.board().squares().iter().map(|s| cell_text(*s)).collect(),
            current_player: Some(self.current_player().to_string()),
            scores: self.score(),
            game_mode: self.mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveError;

    fn cells(marks: &str) -> Vec<String> {
        marks
            .chars()
            .map(|c| match c {
                '.' => String::new(),
                other => other.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parse_valid_board() {
        let board = parse_board(&cells("XX.OO....")).expect("valid board");
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 2);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_board(&cells("XX.OO...")).is_none(), "too short");
        assert!(parse_board(&cells("XX.OO.....")).is_none(), "too long");
        assert!(parse_board(&std::array::from_fn::<String, 9, _>(|_| "Z".to_string())).is_none(), "unknown symbol");
        assert!(parse_board(&cells("XXX......")).is_none(), "parity");
        assert!(parse_board(&cells("OO.......")).is_none(), "O ahead");
        // X owns the top row but O moved last.
        assert!(parse_board(&cells("XXXOO.O..")).is_none(), "winner not last mover");
    }

    #[test]
    fn test_restore_derives_player() {
        let saved = SavedGame {
            board_state: cells("X........"),
            current_player: Some("X".to_string()),
            ..SavedGame::default()
        };
        let game = GameState::restore(saved);
        assert_eq!(game.current_player(), Player::O);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_restore_finished_board_stays_finished() {
        let saved = SavedGame {
            board_state: cells("XXXOO...."),
            scores: Score::new(1, 0),
            ..SavedGame::default()
        };
        let mut game = GameState::restore(saved);
        assert!(game.is_terminal());
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.score(), Score::new(1, 0));

        assert_eq!(game.apply_move(5), Err(MoveError::GameOver));
        assert_eq!(game.current_outcome().winner(), Some(Player::X));
        assert_eq!(game.score(), Score::new(1, 0));

        game.reset();
        assert!(!game.is_terminal());
        assert_eq!(game.score(), Score::new(1, 0));
    }

    #[test]
    fn test_restore_malformed_board_keeps_score_and_mode() {
        let saved = SavedGame {
            board_state: cells("XXXXX"),
            current_player: Some("O".to_string()),
            scores: Score::new(3, 2),
            game_mode: Mode::HumanVsAi,
        };
        let game = GameState::restore(saved);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.score(), Score::new(3, 2));
        assert_eq!(game.mode(), Mode::HumanVsAi);
    }

    #[test]
    fn test_snapshot_restores_identically() {
        let mut game = GameState::new(Mode::HumanVsAi);
        game.apply_move(4).expect("legal move");
        game.apply_move(0).expect("legal move");
        let restored = GameState::restore(game.snapshot());
        assert_eq!(restored, game);
    }

    #[test]
    fn test_original_storage_format() {
        let json = r#"{
            "boardState": ["X","","","","O","","","",""],
            "currentPlayer": "X",
            "scores": {"X": 2, "O": 5},
            "gameMode": "AI"
        }"#;
        let saved: SavedGame = serde_json::from_str(json).expect("parses");
        let game = GameState::restore(saved);
        assert_eq!(game.score(), Score::new(2, 5));
        assert_eq!(game.mode(), Mode::HumanVsAi);
        assert_eq!(game.current_player(), Player::X);

        let out = serde_json::to_value(game.snapshot()).expect("serializes");
        assert_eq!(out["gameMode"], "AI");
        assert_eq!(out["scores"]["O"], 5);
        assert_eq!(out["boardState"][4], "O");
    }

    #[test]
    fn test_wrong_typed_fields_fall_back_individually() {
        let json = r#"{
            "boardState": [1, 2, 3],
            "currentPlayer": 7,
            "scores": {"X": 4, "O": 1},
            "gameMode": "Robot"
        }"#;
        let saved: SavedGame = serde_json::from_str(json).expect("parses");
        assert!(saved.board_state.is_empty());
        assert_eq!(saved.current_player, None);
        assert_eq!(saved.scores, Score::new(4, 1));
        assert_eq!(saved.game_mode, Mode::HumanVsHuman);

        let saved: SavedGame =
            serde_json::from_str(r#"{"scores": "lots", "gameMode": "AI"}"#).expect("parses");
        assert_eq!(saved.scores, Score::default());
        assert_eq!(saved.game_mode, Mode::HumanVsAi);
    }
}
