//! Game configuration.

use std::fmt;

/// Smallest supported board side. The opening layout uses four rows.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 16;

/// Largest supported squad.
pub const MAX_SQUAD_SIZE: usize = 8;

/// Tunable parameters of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: usize,
    /// Units per side at the start of a level.
    pub squad_size: usize,
    /// Last level; clearing it wins the game.
    pub max_level: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            squad_size: 4,
            max_level: 4,
        }
    }
}

impl GameConfig {
    /// Check that the values describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if !(1..=MAX_SQUAD_SIZE).contains(&self.squad_size) {
            return Err(ConfigError::new(format!(
                "squad size must be between 1 and {MAX_SQUAD_SIZE}, got {}",
                self.squad_size
            )));
        }
        if self.max_level == 0 {
            return Err(ConfigError::new("max level must be at least 1"));
        }
        Ok(())
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Description of the error.
    pub reason: String,
}

impl ConfigError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration: {}", self.reason)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig {
            board_size: 3,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("board size"));
    }

    #[test]
    fn test_rejects_empty_squad() {
        let config = GameConfig {
            squad_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_level_cap() {
        let config = GameConfig {
            max_level: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
