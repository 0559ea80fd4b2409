//! JSON save file for the session.

use derive_more::{Display, Error};
use noughts_core::{GameState, Mode, SavedGame};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Save file error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Save file error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Reads and writes the saved session at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Creates a store for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved session. `Ok(None)` when no file exists yet.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<SavedGame>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No save file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let saved = serde_json::from_str(&content)?;
        debug!("Save file loaded");
        Ok(Some(saved))
    }

    /// Writes the session, replacing the previous file atomically.
    #[instrument(skip(self, saved), fields(path = %self.path.display()))]
    pub fn save(&self, saved: &SavedGame) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(saved)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Session saved");
        Ok(())
    }

    /// Restores the saved session, or starts a fresh one in `default_mode`.
    ///
    /// An unreadable or malformed file is logged and ignored.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_game(&self, default_mode: Mode) -> GameState {
        match self.load() {
            Ok(Some(saved)) => {
                let game = GameState::restore(saved);
                info!(score = %game.score(), mode = %game.mode(), "Restored saved session");
                game
            }
            Ok(None) => GameState::new(default_mode),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable save file");
                GameState::new(default_mode)
            }
        }
    }

    /// Saves the session, logging instead of failing.
    pub fn save_game(&self, game: &GameState) {
        if let Err(e) = self.save(&game.snapshot()) {
            warn!(error = %e, "Failed to save session");
        }
    }
}
