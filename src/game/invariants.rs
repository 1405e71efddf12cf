//! Consistency checks over a battlefield: placements, health bounds, levels.
//!
//! A correctly driven battlefield never violates these. They run after every
//! turn in debug builds and on every state restored from a save.

use std::collections::HashSet;

use crate::game::{BattlefieldState, MAX_HEALTH, in_bounds};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all battlefield invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &BattlefieldState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();

    if state.level == 0 {
        violations.push(InvariantViolation {
            message: "level is 0".to_string(),
        });
    }

    for placement in &state.placements {
        let cell = placement.cell;
        let unit = &placement.unit;

        if !in_bounds(cell, state.board_size) {
            violations.push(InvariantViolation {
                message: format!("{} placed off the board at cell {cell}", unit.archetype.name()),
            });
        }

        if !seen.insert(cell) {
            violations.push(InvariantViolation {
                message: format!("cell {cell} holds more than one unit"),
            });
        }

        if !unit.health.is_finite() || unit.health <= 0.0 || unit.health > MAX_HEALTH {
            violations.push(InvariantViolation {
                message: format!(
                    "{} on cell {cell} has health {} outside (0, {MAX_HEALTH}]",
                    unit.archetype.name(),
                    unit.health
                ),
            });
        }

        if unit.level == 0 {
            violations.push(InvariantViolation {
                message: format!("{} on cell {cell} has level 0", unit.archetype.name()),
            });
        }
    }

    if let Some(cell) = state.selected {
        match state.unit_at(cell) {
            None => violations.push(InvariantViolation {
                message: format!("selection points at empty cell {cell}"),
            }),
            Some(unit) if unit.side() != state.current_player => {
                violations.push(InvariantViolation {
                    message: format!("selected {} on cell {cell} belongs to the other side", unit.archetype.name()),
                });
            }
            Some(_) => {}
        }
    }

    if state.high_score < state.score {
        violations.push(InvariantViolation {
            message: format!("high score {} below score {}", state.high_score, state.score),
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Archetype, Placement, Side, Unit};

    fn valid_state() -> BattlefieldState {
        let mut state = BattlefieldState::new(8);
        state.placements = vec![
            Placement::new(Unit::new(Archetype::Bowman, 1), 0),
            Placement::new(Unit::new(Archetype::Undead, 1), 6),
        ];
        state
    }

    #[test]
    fn test_valid_state_has_no_violations() {
        assert!(check_invariants(&valid_state()).is_empty());
    }

    #[test]
    fn test_duplicate_cells() {
        let mut state = valid_state();
        state.placements[1].cell = 0;
        assert_eq!(check_invariants(&state).len(), 1);
    }

    #[test]
    fn test_dead_unit_on_board() {
        let mut state = valid_state();
        state.placements[0].unit.health = 0.0;
        let violations = check_invariants(&state);
        assert!(violations[0].message.contains("health"));
    }

    #[test]
    fn test_off_board() {
        let mut state = valid_state();
        state.placements[1].cell = 64;
        assert!(!check_invariants(&state).is_empty());
    }

    #[test]
    fn test_selection_must_match_turn() {
        let mut state = valid_state();
        state.select(6);
        assert!(!check_invariants(&state).is_empty());

        state.current_player = Side::Computer;
        assert!(check_invariants(&state).is_empty());

        state.select(20);
        assert!(!check_invariants(&state).is_empty());
    }

    #[test]
    fn test_high_score_tracks_score() {
        let mut state = valid_state();
        state.score = 40;
        assert!(!check_invariants(&state).is_empty());
    }
}
