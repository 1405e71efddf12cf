#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tactica::game::check_invariants;
use tactica::{GameConfig, GameController, MemoryStore, NullView};

/// Structured input for click fuzzing.
#[derive(Arbitrary, Debug)]
struct ClickInput {
    /// Random seed for squad generation.
    seed: u64,
    /// Board side, mapped into the supported range.
    board_size: u8,
    /// Squad size, mapped into the supported range.
    squad_size: u8,
    /// Clicked cells, wrapped onto the board.
    clicks: Vec<u16>,
    /// Save after this many clicks and reload at the end.
    save_at: Option<u8>,
}

fuzz_target!(|input: ClickInput| {
    let board_size = 4 + usize::from(input.board_size % 13);
    let squad_size = 1 + usize::from(input.squad_size % 8);
    let config = GameConfig {
        board_size,
        squad_size,
        max_level: 4,
    };
    let rng = ChaCha8Rng::seed_from_u64(input.seed);
    let Ok(mut controller) = GameController::new(config, NullView, MemoryStore::new(), rng) else {
        return;
    };

    let cells = board_size * board_size;
    for (i, click) in input.clicks.iter().take(1000).enumerate() {
        let before = controller.state().clone();
        let result = controller.apply_player_action(usize::from(*click) % cells);

        // Rejected actions must not change anything
        if result.is_err() {
            assert_eq!(controller.state(), &before);
        }

        let violations = check_invariants(controller.state());
        assert!(violations.is_empty(), "click {i}: {violations:?}");

        if input.save_at.is_some_and(|at| usize::from(at) == i) {
            let _ = controller.save_game();
        }
    }

    if input.save_at.is_some() && controller.load_game().is_ok() {
        assert!(check_invariants(controller.state()).is_empty());
    }
});
