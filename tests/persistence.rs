//! Save and restore through the file-backed store.
//!
//! Run with: cargo test persistence

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

use tactica::persistence::{deserialize, serialize};
use tactica::{
    Archetype, BattlefieldState, GameConfig, GameController, GameError, JsonFileStore, NullView,
    Phase, Placement, Side, StateStore, Unit,
};

fn controller_in(dir: &TempDir, seed: u64) -> GameController<NullView, JsonFileStore, ChaCha8Rng> {
    let store = JsonFileStore::new(dir.path().join("save.json"));
    GameController::new(
        GameConfig::default(),
        NullView,
        store,
        ChaCha8Rng::seed_from_u64(seed),
    )
    .unwrap()
}

#[test]
fn test_fresh_game_roundtrip() {
    let dir = TempDir::new().unwrap();
    let controller = controller_in(&dir, 1);

    let state = controller.state();
    assert_eq!(state.selected, None);
    assert!(!state.game_over);

    let restored = deserialize(serialize(state)).unwrap();
    assert_eq!(&restored, state);
}

#[test]
fn test_missing_file_means_no_save() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_save_then_restore_in_new_session() {
    let dir = TempDir::new().unwrap();

    let mut first = controller_in(&dir, 5);
    let first_unit = first
        .state()
        .side_placements(Side::Player)
        .next()
        .unwrap()
        .cell;
    first.apply_player_action(first_unit).unwrap();
    first.save_game().unwrap();
    let saved = first.state().clone();

    let mut second = controller_in(&dir, 99);
    assert!(second.init());
    assert_eq!(second.state(), &saved);
    assert_eq!(second.state().selected, Some(first_unit));
    assert_eq!(second.phase(), Phase::AwaitingTarget);
}

#[test]
fn test_save_file_is_json() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(&dir, 3);
    controller.save_game().unwrap();

    let text = std::fs::read_to_string(dir.path().join("save.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["boardSize"], 8);
    assert_eq!(value["currentPlayer"], "player");
    assert_eq!(value["level"], 1);
    assert!(value["selectedCellIndex"].is_null());
    assert_eq!(value["gameOver"], false);
    assert_eq!(value["positions"].as_array().unwrap().len(), 8);
    assert!(value["positions"][0]["character"]["type"].is_string());
}

#[test]
fn test_corrupt_file_starts_new_game() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("save.json"), "{\"boardSize\": 8").unwrap();

    let mut controller = controller_in(&dir, 4);
    let cell = controller
        .state()
        .side_placements(Side::Player)
        .next()
        .unwrap()
        .cell;
    controller.apply_player_action(cell).unwrap();

    let err = controller.load_game().unwrap_err();
    assert!(matches!(err, GameError::PersistenceUnavailable { .. }));
    assert_eq!(controller.state().selected, None);
    assert_eq!(controller.state().level, 1);
    assert_eq!(controller.phase(), Phase::AwaitingSelection);

    assert!(!controller.init());
    assert_eq!(controller.state().level, 1);
}

fn write_save(dir: &TempDir, state: &BattlefieldState) {
    let mut store = JsonFileStore::new(dir.path().join("save.json"));
    store.save(&serialize(state)).unwrap();
}

#[test]
fn test_decided_round_is_not_restored() {
    let dir = TempDir::new().unwrap();
    let mut state = BattlefieldState::new(8);
    state.placements = vec![Placement::new(Unit::new(Archetype::Vampire, 1), 6)];
    write_save(&dir, &state);

    let mut controller = controller_in(&dir, 8);
    assert!(!controller.init());
    assert_eq!(controller.phase(), Phase::AwaitingSelection);
    assert_eq!(controller.state().count(Side::Player), 4);
    assert_eq!(controller.state().count(Side::Computer), 4);

    // The fresh game is playable.
    let cell = controller
        .state()
        .side_placements(Side::Player)
        .next()
        .unwrap()
        .cell;
    controller.apply_player_action(cell).unwrap();
    assert_eq!(controller.phase(), Phase::AwaitingTarget);
}

#[test]
fn test_level_beyond_last_is_not_restored() {
    let dir = TempDir::new().unwrap();
    let mut state = BattlefieldState::new(8);
    state.level = 9;
    state.placements = vec![
        Placement::new(Unit::new(Archetype::Bowman, 1), 0),
        Placement::new(Unit::new(Archetype::Vampire, 1), 6),
    ];
    write_save(&dir, &state);

    let mut controller = controller_in(&dir, 8);
    assert!(matches!(
        controller.load_game(),
        Err(GameError::PersistenceUnavailable { .. })
    ));
    assert_eq!(controller.state().level, 1);
    assert!(!controller.state().game_over);
}

#[test]
fn test_finished_game_is_restored() {
    let dir = TempDir::new().unwrap();
    let mut state = BattlefieldState::new(8);
    state.placements = vec![Placement::new(Unit::new(Archetype::Vampire, 1), 6)];
    state.game_over = true;
    write_save(&dir, &state);

    let mut controller = controller_in(&dir, 8);
    assert!(controller.init());
    assert_eq!(controller.phase(), Phase::GameOver);
}

#[test]
fn test_unwritable_location_reports_failure() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("missing-dir").join("save.json"));
    let mut controller = GameController::new(
        GameConfig::default(),
        NullView,
        store,
        ChaCha8Rng::seed_from_u64(0),
    )
    .unwrap();

    assert!(matches!(
        controller.save_game(),
        Err(GameError::PersistenceUnavailable { .. })
    ));
    // The session carries on.
    let cell = controller
        .state()
        .side_placements(Side::Player)
        .next()
        .unwrap()
        .cell;
    assert!(controller.apply_player_action(cell).is_ok());
}
