// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Tactica: a turn-based tactical combat engine on a square grid.
//!
//! A human player and a computer opponent each field a squad of units on an
//! `N x N` board. Units move and attack within Chebyshev ranges, damage is
//! computed from attack and defence, and clearing the computer squad advances
//! to a harder level.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Front ends (TUI, text, headless)  │
//! ├─────────────────────────────────────┤
//! │   GameController (turn machine)     │
//! ├──────────────────┬──────────────────┤
//! │   Game rules     │   Persistence    │
//! │   and planner    │   (serde JSON)   │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! The controller talks to its front end through [`BoardView`] and to its
//! save slot through [`StateStore`]; both are traits so the engine runs the
//! same way in a terminal, in tests and in benchmarks.

pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod persistence;
pub mod render;

pub use config::{ConfigError, GameConfig};
pub use controller::{
    Action, ActionReport, Announcement, BoardView, CursorHint, GameController, HighlightColor,
    NullView, Phase, Preview, RoundOutcome, Stats,
};
pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{Archetype, BattlefieldState, Placement, Side, Unit};
pub use persistence::{JsonFileStore, MemoryStore, SaveRecord, StateStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_playable() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_action_report_debug() {
        let report = ActionReport {
            action: Action::Moved { from: 0, to: 2 },
            reply: Some(Action::Passed),
            round: None,
        };
        let debug = format!("{report:?}");
        assert!(debug.contains("Moved"));
        assert!(debug.contains("Passed"));
    }
}
