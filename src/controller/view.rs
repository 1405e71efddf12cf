//! The board view the controller drives.

use std::fmt;

use crate::error::GameError;
use crate::game::Placement;

/// Highlight colors for board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightColor {
    /// The selected unit.
    Selected,
    /// A legal move destination.
    Move,
    /// A legal attack target.
    Attack,
}

/// Cursor affordance hints. These carry no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Nothing to do on this cell.
    Idle,
    /// A unit can be selected or moved here.
    AwaitingMove,
    /// The selected unit can strike here.
    AwaitingAttack,
    /// The selected unit cannot act on this cell.
    Blocked,
    /// The computer is thinking.
    Waiting,
}

/// Scoreboard values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Current level.
    pub level: u8,
    /// Points earned this game.
    pub score: u32,
    /// Best score seen.
    pub high_score: u32,
    /// Whether the game has ended.
    pub game_over: bool,
}

/// Messages the controller wants shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Announcement {
    /// A level begins.
    LevelStarted {
        /// The new level.
        level: u8,
    },
    /// The computer squad was wiped out below the last level.
    LevelCleared {
        /// The level that was cleared.
        level: u8,
    },
    /// The last level was cleared.
    Victory {
        /// Final score.
        score: u32,
    },
    /// The player squad was wiped out.
    Defeat {
        /// Final score.
        score: u32,
    },
    /// The player's action was refused.
    Rejected(GameError),
    /// The game was saved.
    Saved,
    /// Saving failed; the session continues.
    SaveFailed(GameError),
    /// A saved game was restored.
    Loaded,
    /// Loading failed or nothing was saved.
    LoadFailed(GameError),
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::LevelStarted { level } => write!(f, "Level {level} begins"),
            Announcement::LevelCleared { level } => {
                write!(f, "Level {level} cleared! Level {} begins", level + 1)
            }
            Announcement::Victory { score } => {
                write!(f, "Victory! All levels cleared with {score} points")
            }
            Announcement::Defeat { score } => write!(f, "Game over. You scored {score} points"),
            Announcement::Rejected(err) => write!(f, "{err}"),
            Announcement::Saved => write!(f, "Game saved"),
            Announcement::SaveFailed(err) => write!(f, "Save failed: {err}"),
            Announcement::Loaded => write!(f, "Game loaded"),
            Announcement::LoadFailed(err) => write!(f, "Load failed: {err}"),
        }
    }
}

/// Everything the controller needs from a front end.
///
/// Calls are synchronous. [`BoardView::show_transient_effect`] returning is
/// the acknowledgement that the effect has been shown; the controller does
/// not mutate the battlefield until it returns.
pub trait BoardView {
    /// Redraw all units.
    fn render(&mut self, placements: &[Placement]);

    /// Highlight a cell.
    fn highlight_cell(&mut self, cell: usize, color: HighlightColor);

    /// Remove a cell highlight.
    fn clear_highlight(&mut self, cell: usize);

    /// Show a short-lived damage number over a cell.
    fn show_transient_effect(&mut self, cell: usize, value: f64);

    /// Update the cursor affordance.
    fn set_cursor(&mut self, hint: CursorHint);

    /// Update the scoreboard.
    fn show_stats(&mut self, _stats: Stats) {}

    /// Tell the user something.
    fn announce(&mut self, _announcement: &Announcement) {}
}

/// A view that ignores everything. Used for headless play.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl BoardView for NullView {
    fn render(&mut self, _placements: &[Placement]) {}

    fn highlight_cell(&mut self, _cell: usize, _color: HighlightColor) {}

    fn clear_highlight(&mut self, _cell: usize) {}

    fn show_transient_effect(&mut self, _cell: usize, _value: f64) {}

    fn set_cursor(&mut self, _hint: CursorHint) {}
}
