//! Battlefield state: who stands where, whose turn it is, and the score.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::game::{Side, Unit};

/// A unit bound to a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The unit standing on the cell.
    #[serde(rename = "character")]
    pub unit: Unit,
    /// Linear cell index.
    #[serde(rename = "position")]
    pub cell: usize,
}

impl Placement {
    /// Bind a unit to a cell.
    #[must_use]
    pub const fn new(unit: Unit, cell: usize) -> Self {
        Self { unit, cell }
    }
}

/// Complete battlefield state.
///
/// Placements are kept in the order they were created; the computer scans
/// them in that order, so removal preserves the relative order of the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct BattlefieldState {
    /// Side length of the board.
    pub board_size: usize,
    /// Side holding the turn.
    pub current_player: Side,
    /// Current level, starting at 1.
    pub level: u8,
    /// Units on the board.
    pub placements: Vec<Placement>,
    /// Points earned this game.
    pub score: u32,
    /// Best score seen.
    pub high_score: u32,
    /// Cell of the selected unit, if any.
    pub selected: Option<usize>,
    /// Set once the game is won or lost.
    pub game_over: bool,
}

impl BattlefieldState {
    /// Create an empty level-1 battlefield with the player to move.
    #[must_use]
    pub const fn new(board_size: usize) -> Self {
        Self {
            board_size,
            current_player: Side::Player,
            level: 1,
            placements: Vec::new(),
            score: 0,
            high_score: 0,
            selected: None,
            game_over: false,
        }
    }

    /// Placement on a cell.
    #[must_use]
    pub fn placement_at(&self, cell: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.cell == cell)
    }

    /// Unit on a cell.
    #[must_use]
    pub fn unit_at(&self, cell: usize) -> Option<&Unit> {
        self.placement_at(cell).map(|p| &p.unit)
    }

    /// Mutable unit on a cell.
    #[must_use]
    pub fn unit_at_mut(&mut self, cell: usize) -> Option<&mut Unit> {
        self.placements
            .iter_mut()
            .find(|p| p.cell == cell)
            .map(|p| &mut p.unit)
    }

    /// All occupied cells.
    #[must_use]
    pub fn occupied(&self) -> HashSet<usize> {
        self.placements.iter().map(|p| p.cell).collect()
    }

    /// Placements of one side, in placement order.
    pub fn side_placements(&self, side: Side) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.unit.side() == side)
    }

    /// Number of units a side has on the board.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.side_placements(side).count()
    }

    /// The selected placement, if any.
    #[must_use]
    pub fn selected_placement(&self) -> Option<&Placement> {
        self.selected.and_then(|cell| self.placement_at(cell))
    }

    /// Select the unit on `cell`.
    pub fn select(&mut self, cell: usize) {
        self.selected = Some(cell);
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Hand the turn to the other side. Clears the selection.
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
        self.deselect();
    }

    /// Move the placement on `from` to `to`.
    ///
    /// Returns `false` if `from` is empty. The caller checks legality.
    pub fn relocate(&mut self, from: usize, to: usize) -> bool {
        match self.placements.iter_mut().find(|p| p.cell == from) {
            Some(placement) => {
                placement.cell = to;
                true
            }
            None => false,
        }
    }

    /// Remove the placement on `cell`, returning it.
    pub fn remove(&mut self, cell: usize) -> Option<Placement> {
        let index = self.placements.iter().position(|p| p.cell == cell)?;
        if self.selected == Some(cell) {
            self.deselect();
        }
        Some(self.placements.remove(index))
    }

    /// Add points and refresh the high score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.high_score = self.high_score.max(self.score);
    }

    /// Advance to the next level.
    ///
    /// Surviving player units heal and, below the veteran level, gain one
    /// level-up step. Computer units are left to the caller.
    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);

        for placement in &mut self.placements {
            let unit = &mut placement.unit;
            if unit.side() == Side::Player {
                unit.heal(crate::game::LEVEL_HEAL);
                if unit.level < crate::game::VETERAN_LEVEL {
                    unit.level_up();
                }
            }
        }
    }

    /// Drop every unit of `side` from the board.
    pub fn clear_side(&mut self, side: Side) {
        self.placements.retain(|p| p.unit.side() != side);
        if self.selected_placement().is_none() {
            self.deselect();
        }
    }
}
