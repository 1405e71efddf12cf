//! Movement, attack and damage rules.
//!
//! Reach is measured in Chebyshev distance. Damage always lands at least a
//! tenth of the attacker's attack, so even a well-armoured target wears down.

use std::collections::HashSet;

use crate::game::{BattlefieldState, Side, Unit, distance};

/// Fraction of attack that always gets through.
const CHIP_DAMAGE: f64 = 0.1;

/// Points per kill, multiplied by the current level.
pub const KILL_POINTS: u32 = 10;

/// Points for clearing a level, multiplied by the current level.
pub const ROUND_POINTS: u32 = 100;

/// Check if `unit` on `from` may move to `to`.
///
/// Fails on an occupied destination regardless of range. A move onto the
/// unit's own cell is not rejected here; callers decide what that means.
#[must_use]
pub fn can_move(
    from: usize,
    to: usize,
    unit: &Unit,
    board_size: usize,
    occupied: &HashSet<usize>,
) -> bool {
    if occupied.contains(&to) {
        return false;
    }
    distance(from, to, board_size) <= unit.move_range()
}

/// Check if `attacker` on `from` may strike `target` on `to`.
#[must_use]
pub fn can_attack(
    from: usize,
    to: usize,
    attacker: &Unit,
    board_size: usize,
    target: Option<&Unit>,
) -> bool {
    let Some(target) = target else {
        return false;
    };
    if target.side() == attacker.side() {
        return false;
    }
    distance(from, to, board_size) <= attacker.attack_range()
}

/// Damage `attacker` deals to `target`. Not rounded.
#[must_use]
pub fn compute_damage(attacker: &Unit, target: &Unit) -> f64 {
    let attack = f64::from(attacker.attack);
    let defence = f64::from(target.defence);
    (attack - defence).max(attack * CHIP_DAMAGE)
}

/// Apply damage to the unit on `target`.
///
/// A unit whose health drops to zero or below is removed from the board.
/// Kills made by the player score [`KILL_POINTS`] times the level.
///
/// Returns `true` if the target died. An empty cell is left untouched.
pub fn apply_damage(state: &mut BattlefieldState, target: usize, damage: f64, by: Side) -> bool {
    let Some(unit) = state.unit_at_mut(target) else {
        return false;
    };
    if !unit.take_damage(damage) {
        return false;
    }

    state.remove(target);
    if by == Side::Player {
        state.add_score(KILL_POINTS * u32::from(state.level));
    }
    true
}

/// Check if either side has been wiped out.
#[must_use]
pub fn round_over(state: &BattlefieldState) -> bool {
    state.count(Side::Player) == 0 || state.count(Side::Computer) == 0
}
