//! Text renderers for terminal viewing and logs.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use crate::game::{
    Archetype, BattlefieldState, HealthLevel, Side, TileZone, Unit, tile_zone, to_row_col,
};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";

/// Board glyph for an archetype. Player units are uppercase.
#[must_use]
pub const fn glyph(archetype: Archetype) -> char {
    match archetype {
        Archetype::Bowman => 'B',
        Archetype::Swordsman => 'S',
        Archetype::Magician => 'M',
        Archetype::Vampire => 'v',
        Archetype::Undead => 'u',
        Archetype::Daemon => 'd',
    }
}

/// Render the battlefield as a framed ASCII grid.
///
/// Output format:
/// ```text
/// Level 1  Score 0  Best 0  [player to move]
/// ┌─────────────────┐
/// │ B . . . . . v . │
/// │ B . . . . . v . │
/// │ . . . . . . . . │
/// └─────────────────┘
/// ```
///
/// The selected unit is marked with `*`. With `color` set, units are tinted
/// by health band.
#[must_use]
pub fn render_ascii(state: &BattlefieldState, color: bool) -> String {
    let mut output = String::new();
    let width = state.board_size * 2 + 1;

    render_header(&mut output, state);

    output.push('┌');
    output.push_str(&"─".repeat(width));
    output.push_str("┐\n");

    for cell in 0..state.board_size * state.board_size {
        let zone = tile_zone(cell, state.board_size);
        if matches!(zone, TileZone::TopLeft | TileZone::Left | TileZone::BottomLeft) {
            output.push_str("│ ");
        }

        match state.unit_at(cell) {
            Some(unit) => render_unit(&mut output, unit, color),
            None if color => output.push_str(&format!("{GRAY}.{RESET}")),
            None => output.push('.'),
        }
        output.push(if state.selected == Some(cell) { '*' } else { ' ' });

        if matches!(zone, TileZone::TopRight | TileZone::Right | TileZone::BottomRight) {
            output.push_str("│\n");
        }
    }

    output.push('└');
    output.push_str(&"─".repeat(width));
    output.push_str("┘\n");

    output.push_str("\nLegend: B=Bowman S=Swordsman M=Magician  v=Vampire u=Undead d=Daemon  *=Selected\n");
    output
}

fn render_header(output: &mut String, state: &BattlefieldState) {
    output.push_str(&format!(
        "Level {}  Score {}  Best {}  ",
        state.level, state.score, state.high_score
    ));
    if state.game_over {
        output.push_str("[game over]\n");
    } else {
        let side = match state.current_player {
            Side::Player => "player",
            Side::Computer => "computer",
        };
        output.push_str(&format!("[{side} to move]\n"));
    }
}

fn render_unit(output: &mut String, unit: &Unit, color: bool) {
    let symbol = glyph(unit.archetype);
    if !color {
        output.push(symbol);
        return;
    }
    let tint = match unit.health_level() {
        HealthLevel::High => GREEN,
        HealthLevel::Normal => YELLOW,
        HealthLevel::Critical => RED,
    };
    output.push_str(&format!("{BOLD}{tint}{symbol}{RESET}"));
}

/// Render a structured unit roster, one line per unit.
///
/// Output format:
/// ```text
/// === LEVEL 2 ===
/// SCORE: 110 (best 110)
/// TURN: player
///
/// PLAYER UNITS (1):
/// - swordsman at (0, 0) 🎖2 ⚔72 🛡18 ❤100
///
/// COMPUTER UNITS (1):
/// - vampire at (0, 6) 🎖1 ⚔25 🛡25 ❤50
/// ```
#[must_use]
pub fn render_summary(state: &BattlefieldState) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== LEVEL {} ===\n", state.level));
    output.push_str(&format!(
        "SCORE: {} (best {})\n",
        state.score, state.high_score
    ));
    if state.game_over {
        output.push_str("GAME OVER\n");
    } else {
        let side = match state.current_player {
            Side::Player => "player",
            Side::Computer => "computer",
        };
        output.push_str(&format!("TURN: {side}\n"));
    }

    for (title, side) in [("PLAYER", Side::Player), ("COMPUTER", Side::Computer)] {
        output.push_str(&format!("\n{title} UNITS ({}):\n", state.count(side)));
        for placement in state.side_placements(side) {
            let (row, col) = to_row_col(placement.cell, state.board_size)
                .map_or((placement.cell, 0), |c| (c.row, c.col));
            output.push_str(&format!(
                "- {} at ({row}, {col}) {}\n",
                placement.unit.archetype.name(),
                placement.unit.info()
            ));
        }
    }

    output
}
