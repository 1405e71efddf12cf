//! Game layer for Tactica.
//!
//! Implements the combat rules on a square grid:
//! - Grid geometry (cell indices, Chebyshev distance)
//! - Unit archetypes and leveling
//! - Squad generation and starting layouts
//! - Battlefield state
//! - Move/attack legality and damage
//! - The greedy turn planner used by the computer

mod grid;
mod invariants;
mod rules;
mod squad;
mod state;
mod strategy;
mod unit;

pub use grid::{Coord, TileZone, distance, in_bounds, neighborhood, tile_zone, to_row_col};
pub use invariants::{InvariantViolation, check_invariants};
pub use rules::{
    KILL_POINTS, ROUND_POINTS, apply_damage, can_attack, can_move, compute_damage, round_over,
};
pub use squad::{
    computer_start_cell, generate_squad, opening_layout, place_reinforcements, player_start_cell,
    reinforcement_cell,
};
pub use state::{BattlefieldState, Placement};
pub use strategy::{PlannedAction, plan_turn};
pub use unit::{
    Archetype, BaseStats, COMPUTER_POOL, HealthLevel, LEVEL_HEAL, MAX_HEALTH, PLAYER_POOL, Side,
    Unit, VETERAN_LEVEL,
};
