//! Error types for the combat engine.

use std::fmt;

/// Reasons an operation on the battlefield can fail.
///
/// Every variant except [`GameError::InvalidIndex`] is recoverable: the
/// action is rejected and the battlefield is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Cell index outside the board. Indicates a malformed view event.
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Side length of the board.
        board_size: usize,
    },
    /// Destination is occupied or out of the unit's move range.
    IllegalMove {
        /// Cell of the selected unit.
        from: usize,
        /// Requested destination.
        to: usize,
    },
    /// Target is friendly, absent, or out of the attacker's range.
    IllegalAttack {
        /// Cell of the attacking unit.
        from: usize,
        /// Cell of the intended target.
        to: usize,
    },
    /// The action needs a selected unit first.
    NoSelection {
        /// Cell that was activated.
        cell: usize,
    },
    /// A player action arrived while the computer holds the turn.
    NotPlayerTurn,
    /// The state store failed or returned a malformed record.
    PersistenceUnavailable {
        /// Description of the failure.
        reason: String,
    },
}

impl GameError {
    /// Shorthand for a persistence failure.
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidIndex { index, board_size } => {
                write!(f, "cell {index} is outside the {board_size}x{board_size} board")
            }
            GameError::IllegalMove { from, to } => {
                write!(f, "cannot move from cell {from} to cell {to}")
            }
            GameError::IllegalAttack { from, to } => {
                write!(f, "cannot attack cell {to} from cell {from}")
            }
            GameError::NoSelection { cell } => {
                write!(f, "select one of your units before acting on cell {cell}")
            }
            GameError::NotPlayerTurn => write!(f, "it is the computer's turn"),
            GameError::PersistenceUnavailable { reason } => {
                write!(f, "saved game unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for battlefield operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_cells() {
        let err = GameError::IllegalMove { from: 3, to: 12 };
        let text = err.to_string();
        assert!(text.contains('3'));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_persistence_shorthand() {
        let err = GameError::persistence("disk full");
        assert_eq!(
            err,
            GameError::PersistenceUnavailable {
                reason: "disk full".to_string()
            }
        );
        assert!(err.to_string().contains("disk full"));
    }
}
