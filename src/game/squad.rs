//! Squad generation and starting layouts.

use rand::Rng;

use crate::game::{Archetype, Placement, Unit, in_bounds};

/// Draw `count` random units from `pool`.
///
/// Each unit gets a uniformly drawn archetype and a uniformly drawn level in
/// `[1, level_cap]`. An empty pool yields an empty squad.
pub fn generate_squad<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[Archetype],
    level_cap: u8,
    count: usize,
) -> Vec<Unit> {
    if pool.is_empty() {
        return Vec::new();
    }
    let level_cap = level_cap.max(1);

    (0..count)
        .map(|_| {
            let archetype = pool[rng.gen_range(0..pool.len())];
            let level = rng.gen_range(1..=level_cap);
            let mut unit = Unit::new(archetype, level);
            unit.level = unit.level.min(level_cap);
            unit
        })
        .collect()
}

/// Cell of the `index`-th player unit in the opening layout.
///
/// The first four units fill rows 0-3 of column 0, the next four column 1.
#[must_use]
pub const fn player_start_cell(index: usize, board_size: usize) -> usize {
    (index % 4) * board_size + index / 4
}

/// Cell of the `index`-th computer unit in the opening layout.
///
/// Mirrors the player: the second-to-last column first, then the last one.
#[must_use]
pub const fn computer_start_cell(index: usize, board_size: usize) -> usize {
    (index % 4) * board_size + board_size - 2 + index / 4
}

/// Cell of the `index`-th computer unit arriving at a new level.
#[must_use]
pub const fn reinforcement_cell(index: usize, board_size: usize) -> usize {
    let row = (index / 2) * 2;
    let col = board_size - 2 + index % 2;
    row * board_size + col
}

/// Lay out both squads for a new game.
///
/// Player units fill the left columns and computer units the right ones.
/// Units whose cell is taken or off the board are dropped.
#[must_use]
pub fn opening_layout(player: Vec<Unit>, computer: Vec<Unit>, board_size: usize) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(player.len() + computer.len());

    for (index, unit) in player.into_iter().enumerate() {
        push_if_free(&mut placements, unit, player_start_cell(index, board_size), board_size);
    }
    for (index, unit) in computer.into_iter().enumerate() {
        push_if_free(&mut placements, unit, computer_start_cell(index, board_size), board_size);
    }

    placements
}

/// Add a fresh computer squad next to existing placements.
pub fn place_reinforcements(placements: &mut Vec<Placement>, squad: Vec<Unit>, board_size: usize) {
    for (index, unit) in squad.into_iter().enumerate() {
        push_if_free(placements, unit, reinforcement_cell(index, board_size), board_size);
    }
}

fn push_if_free(placements: &mut Vec<Placement>, unit: Unit, cell: usize, board_size: usize) {
    if in_bounds(cell, board_size) && placements.iter().all(|p| p.cell != cell) {
        placements.push(Placement::new(unit, cell));
    }
}
