//! Saving and restoring battlefields.
//!
//! A battlefield is flattened into a [`SaveRecord`], a plain serde struct,
//! and stored as JSON by a [`StateStore`]. Restoring validates the record
//! against the battlefield invariants before handing it back, so a corrupted
//! save never produces an inconsistent game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GameError, GameResult};
use crate::game::{BattlefieldState, Placement, Side, check_invariants};

/// Plain, serializable snapshot of a battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    /// Side length of the board.
    pub board_size: usize,
    /// Side holding the turn.
    pub current_player: Side,
    /// Cell of the selected unit.
    pub selected_cell_index: Option<usize>,
    /// Current level.
    pub level: u8,
    /// Units on the board, in placement order.
    pub positions: Vec<Placement>,
    /// Points earned this game.
    pub score: u32,
    /// Best score seen.
    pub max_score: u32,
    /// Whether the game has ended.
    pub game_over: bool,
}

/// Flatten a battlefield into a record.
#[must_use]
pub fn serialize(state: &BattlefieldState) -> SaveRecord {
    SaveRecord {
        board_size: state.board_size,
        current_player: state.current_player,
        selected_cell_index: state.selected,
        level: state.level,
        positions: state.placements.clone(),
        score: state.score,
        max_score: state.high_score,
        game_over: state.game_over,
    }
}

/// Rebuild a battlefield from a record.
///
/// # Errors
///
/// Returns [`GameError::PersistenceUnavailable`] if the record describes an
/// unsupported board or violates a battlefield invariant.
pub fn deserialize(record: SaveRecord) -> GameResult<BattlefieldState> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&record.board_size) {
        return Err(GameError::persistence(format!(
            "unsupported board size {}",
            record.board_size
        )));
    }

    let state = BattlefieldState {
        board_size: record.board_size,
        current_player: record.current_player,
        level: record.level,
        placements: record.positions,
        score: record.score,
        high_score: record.max_score,
        selected: record.selected_cell_index,
        game_over: record.game_over,
    };

    let violations = check_invariants(&state);
    if let Some(first) = violations.first() {
        return Err(GameError::persistence(first.to_string()));
    }

    Ok(state)
}

/// Encode a record as JSON.
///
/// # Errors
///
/// Returns [`GameError::PersistenceUnavailable`] if encoding fails.
pub fn to_json(record: &SaveRecord) -> GameResult<String> {
    serde_json::to_string_pretty(record).map_err(|e| GameError::persistence(e.to_string()))
}

/// Decode a record from JSON.
///
/// # Errors
///
/// Returns [`GameError::PersistenceUnavailable`] if the text is not a valid record.
pub fn from_json(text: &str) -> GameResult<SaveRecord> {
    serde_json::from_str(text).map_err(|e| GameError::persistence(format!("malformed save: {e}")))
}

/// Storage for a single saved game.
///
/// Implementations receive a copy of the record and must not expect the
/// caller to keep it alive.
pub trait StateStore {
    /// Load the saved record, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PersistenceUnavailable`] on I/O failure or a
    /// malformed stored record.
    fn load(&mut self) -> GameResult<Option<SaveRecord>>;

    /// Replace the saved record.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PersistenceUnavailable`] on I/O failure.
    fn save(&mut self, record: &SaveRecord) -> GameResult<()>;
}

/// Stores the game as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the save file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&mut self) -> GameResult<Option<SaveRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GameError::persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        from_json(&text).map(Some)
    }

    fn save(&mut self, record: &SaveRecord) -> GameResult<()> {
        let json = to_json(record)?;
        fs::write(&self.path, json).map_err(|e| {
            GameError::persistence(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

/// Keeps the saved game in memory as JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding raw text, which need not be a valid record.
    #[must_use]
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: Some(text.into()),
        }
    }

    /// Raw stored text.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> GameResult<Option<SaveRecord>> {
        self.slot.as_deref().map(from_json).transpose()
    }

    fn save(&mut self, record: &SaveRecord) -> GameResult<()> {
        self.slot = Some(to_json(record)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Archetype, Unit};

    fn sample_state() -> BattlefieldState {
        let mut state = BattlefieldState::new(8);
        state.level = 2;
        state.placements = vec![
            Placement::new(Unit::new(Archetype::Swordsman, 2), 0),
            Placement::new(Unit::new(Archetype::Daemon, 1), 6),
        ];
        state.placements[1].unit.health = 47.5;
        state.add_score(20);
        state.select(0);
        state
    }

    #[test]
    fn test_roundtrip_with_selection() {
        let state = sample_state();
        let restored = deserialize(serialize(&state)).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_json_field_names() {
        let json = to_json(&serialize(&sample_state())).unwrap();
        assert!(json.contains("\"currentPlayer\": \"player\""));
        assert!(json.contains("\"selectedCellIndex\": 0"));
        assert!(json.contains("\"maxScore\": 20"));
        assert!(json.contains("\"type\": \"daemon\""));
        assert!(json.contains("\"position\": 6"));
    }

    #[test]
    fn test_rejects_duplicate_cells() {
        let mut record = serialize(&sample_state());
        record.positions[1].cell = 0;
        assert!(matches!(
            deserialize(record),
            Err(GameError::PersistenceUnavailable { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_board_size() {
        let mut record = serialize(&sample_state());
        record.board_size = 0;
        assert!(deserialize(record).is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        let record = serialize(&sample_state());
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
    }

    #[test]
    fn test_memory_store_garbage() {
        let mut store = MemoryStore::with_raw("garbage");
        assert!(store.load().is_err());
    }
}
