//! Multi-turn integration tests for the turn controller.
//!
//! These tests drive whole games through the public API and check that the
//! battlefield stays consistent and that rounds resolve the way they should.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rand::SeedableRng;
use rand::rngs::mock::StepRng;
use rand_chacha::ChaCha8Rng;

use tactica::game::{check_invariants, distance, reinforcement_cell};
use tactica::{
    Action, Archetype, BattlefieldState, GameConfig, GameController, GameError, MemoryStore,
    NullView, Phase, Placement, RoundOutcome, Side, Unit,
};

fn weak(archetype: Archetype) -> Unit {
    let mut unit = Unit::new(archetype, 1);
    unit.health = 5.0;
    unit
}

fn controller_with(
    placements: Vec<Placement>,
    max_level: u8,
) -> GameController<NullView, MemoryStore, StepRng> {
    let mut state = BattlefieldState::new(8);
    state.placements = placements;
    let config = GameConfig {
        max_level,
        ..GameConfig::default()
    };
    GameController::with_state(config, state, NullView, MemoryStore::new(), StepRng::new(0, 0))
        .unwrap()
}

#[test]
fn test_self_play_keeps_invariants() {
    for seed in 0..20 {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let mut controller =
            GameController::new(GameConfig::default(), NullView, MemoryStore::new(), rng).unwrap();

        for _ in 0..500 {
            let Some(report) = controller.autoplay_turn().unwrap() else {
                break;
            };
            let violations = check_invariants(controller.state());
            assert!(violations.is_empty(), "seed {seed}: {violations:?}");

            if let Some(RoundOutcome::LevelAdvanced { level }) = report.round {
                assert_eq!(controller.state().level, level);
                assert!(level <= controller.config().max_level);
            }
        }

        let state = controller.state();
        assert!(state.high_score >= state.score);
        if state.game_over {
            assert_eq!(controller.phase(), Phase::GameOver);
        }
    }
}

#[test]
fn test_swordsman_reach() {
    let mut controller = controller_with(
        vec![
            Placement::new(Unit::new(Archetype::Swordsman, 1), 0),
            Placement::new(Unit::new(Archetype::Vampire, 1), 63),
        ],
        4,
    );

    controller.apply_player_action(0).unwrap();
    assert_eq!(
        controller.apply_player_action(5),
        Err(GameError::IllegalMove { from: 0, to: 5 })
    );
    let report = controller.apply_player_action(4).unwrap();
    assert_eq!(report.action, Action::Moved { from: 0, to: 4 });
}

#[test]
fn test_clearing_level_brings_reinforcements() {
    let mut controller = controller_with(
        vec![
            Placement::new(Unit::new(Archetype::Bowman, 1), 0),
            Placement::new(Unit::new(Archetype::Magician, 1), 8),
            Placement::new(weak(Archetype::Undead), 2),
        ],
        4,
    );

    controller.apply_player_action(0).unwrap();
    let report = controller.apply_player_action(2).unwrap();
    assert_eq!(report.round, Some(RoundOutcome::LevelAdvanced { level: 2 }));

    let state = controller.state();
    assert_eq!(state.level, 2);
    assert_eq!(state.score, 10 + 100);
    assert_eq!(state.count(Side::Player), 2);
    for i in 0..4 {
        let cell = reinforcement_cell(i, 8);
        assert_eq!(state.unit_at(cell).map(Unit::side), Some(Side::Computer));
    }

    // Survivors heal and level up between rounds.
    let bowman = state.unit_at(0).unwrap();
    assert_eq!(bowman.level, 2);
    assert!(bowman.health > 99.0);
}

#[test]
fn test_clearing_last_level_wins() {
    let mut controller = controller_with(
        vec![
            Placement::new(Unit::new(Archetype::Bowman, 1), 0),
            Placement::new(weak(Archetype::Undead), 2),
        ],
        1,
    );

    controller.apply_player_action(0).unwrap();
    let report = controller.apply_player_action(2).unwrap();

    assert_eq!(report.round, Some(RoundOutcome::Victory));
    assert!(controller.state().game_over);
    assert_eq!(controller.state().count(Side::Computer), 0);
    assert_eq!(
        controller.apply_player_action(0).unwrap().action,
        Action::Ignored
    );
}

#[test]
fn test_losing_last_unit_ends_game() {
    let mut controller = controller_with(
        vec![
            Placement::new(weak(Archetype::Bowman), 0),
            Placement::new(Unit::new(Archetype::Undead, 1), 18),
        ],
        4,
    );

    // Step next to the undead; it answers with a fatal strike.
    controller.apply_player_action(0).unwrap();
    let report = controller.apply_player_action(9).unwrap();
    assert_eq!(distance(9, 18, 8), 1);

    assert!(matches!(
        report.reply,
        Some(Action::Attacked { killed: true, .. })
    ));
    assert_eq!(report.round, Some(RoundOutcome::Defeat));
    assert!(controller.state().game_over);
    assert_eq!(controller.state().count(Side::Player), 0);
}

#[test]
fn test_self_click_deselects() {
    let mut controller =
        GameController::new(GameConfig::default(), NullView, MemoryStore::new(), StepRng::new(0, 0))
            .unwrap();

    controller.apply_player_action(8).unwrap();
    assert_eq!(controller.state().selected, Some(8));

    let report = controller.apply_player_action(8).unwrap();
    assert_eq!(report.action, Action::Deselected { cell: 8 });
    assert_eq!(controller.state().selected, None);
    assert_eq!(controller.state().current_player, Side::Player);
}

#[test]
fn test_rejected_actions_leave_state_untouched() {
    let mut controller =
        GameController::new(GameConfig::default(), NullView, MemoryStore::new(), StepRng::new(0, 0))
            .unwrap();
    controller.apply_player_action(0).unwrap();
    let before = controller.state().clone();

    for cell in [5, 7, 30, 63] {
        assert!(controller.apply_player_action(cell).is_err());
        assert_eq!(controller.state(), &before);
    }
}
