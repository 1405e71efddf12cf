//! Benchmarks for the turn planner and complete self-play games.
//!
//! Self-play drives both sides through the controller - the hot path of the
//! `simulate` command.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tactica::game::{Side, plan_turn};
use tactica::{GameConfig, GameController, MemoryStore, NullView};

fn self_play(config: GameConfig, seed: u64) -> u32 {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut controller = GameController::new(config, NullView, MemoryStore::new(), rng).unwrap();
    for _ in 0..500 {
        if controller.autoplay_turn().unwrap().is_none() {
            break;
        }
    }
    controller.state().score
}

fn bench_plan_turn(c: &mut Criterion) {
    let rng = ChaCha8Rng::seed_from_u64(42);
    let controller =
        GameController::new(GameConfig::default(), NullView, MemoryStore::new(), rng).unwrap();
    let state = controller.state().clone();

    c.bench_function("plan_turn_opening", |b| {
        b.iter(|| black_box(plan_turn(black_box(&state), Side::Computer)));
    });
}

fn bench_self_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play");

    for (name, board_size, squad_size) in [("8x8_4v4", 8, 4), ("16x16_8v8", 16, 8)] {
        let config = GameConfig {
            board_size,
            squad_size,
            ..GameConfig::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| black_box(self_play(black_box(config), black_box(42))));
        });
    }

    group.finish();
}

fn bench_save_roundtrip(c: &mut Criterion) {
    use tactica::persistence::{deserialize, from_json, serialize, to_json};

    let rng = ChaCha8Rng::seed_from_u64(7);
    let controller =
        GameController::new(GameConfig::default(), NullView, MemoryStore::new(), rng).unwrap();
    let state = controller.state().clone();

    c.bench_function("save_roundtrip", |b| {
        b.iter(|| {
            let json = to_json(&serialize(black_box(&state))).unwrap();
            black_box(deserialize(from_json(&json).unwrap()).unwrap())
        });
    });
}

criterion_group!(benches, bench_plan_turn, bench_self_play, bench_save_roundtrip);
criterion_main!(benches);
