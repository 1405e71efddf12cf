//! Greedy turn planner used by the computer opponent.
//!
//! The planner scans units in placement order: the first attack in reach
//! wins, otherwise the first unit that can step one cell closer to its
//! nearest enemy does so. Candidate steps are tried in row-major order over
//! the 3×3 window, and the first improving cell is taken.

use crate::game::{BattlefieldState, Placement, Side, can_attack, can_move, distance, neighborhood};

/// What a side does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// Strike the unit on `to` from `from`.
    Attack {
        /// Attacker's cell.
        from: usize,
        /// Target's cell.
        to: usize,
    },
    /// Step from `from` to `to`.
    Move {
        /// Mover's cell.
        from: usize,
        /// Destination cell.
        to: usize,
    },
    /// Nothing useful to do.
    Pass,
}

/// Plan one turn for `side`.
#[must_use]
pub fn plan_turn(state: &BattlefieldState, side: Side) -> PlannedAction {
    let own: Vec<&Placement> = state.side_placements(side).collect();
    let enemies: Vec<&Placement> = state.side_placements(side.opponent()).collect();

    if let Some(action) = find_attack(state.board_size, &own, &enemies) {
        return action;
    }

    for mover in &own {
        if let Some(to) = find_approach(state, mover, &enemies) {
            return PlannedAction::Move {
                from: mover.cell,
                to,
            };
        }
    }

    PlannedAction::Pass
}

fn find_attack(board_size: usize, own: &[&Placement], enemies: &[&Placement]) -> Option<PlannedAction> {
    for attacker in own {
        for target in enemies {
            if can_attack(attacker.cell, target.cell, &attacker.unit, board_size, Some(&target.unit)) {
                return Some(PlannedAction::Attack {
                    from: attacker.cell,
                    to: target.cell,
                });
            }
        }
    }
    None
}

/// First neighbouring cell that brings `mover` closer to its nearest enemy.
fn find_approach(state: &BattlefieldState, mover: &Placement, enemies: &[&Placement]) -> Option<usize> {
    let board_size = state.board_size;

    let mut nearest: Option<(usize, usize)> = None;
    for enemy in enemies {
        let d = distance(mover.cell, enemy.cell, board_size);
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((enemy.cell, d));
        }
    }
    let (target, current) = nearest?;

    let occupied = state.occupied();
    neighborhood(mover.cell, board_size).into_iter().find(|&cell| {
        !occupied.contains(&cell)
            && distance(cell, target, board_size) < current
            && can_move(mover.cell, cell, &mover.unit, board_size, &occupied)
    })
}
