//! CLI command implementations for Tactica.

pub(crate) mod play;
pub(crate) mod show;
pub(crate) mod simulate;

mod output;

use clap::{Args, ValueEnum};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tactica::{ConfigError, GameConfig, GameError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowFormat {
    /// ASCII board.
    Text,
    /// Unit roster.
    Summary,
    /// The raw save record as JSON.
    Json,
}

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Game settings shared by every subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct GameArgs {
    /// Board side length (4-16)
    #[arg(long, default_value = "8")]
    pub(crate) board_size: usize,

    /// Units per side at the start of a level (1-8)
    #[arg(long, default_value = "4")]
    pub(crate) squad_size: usize,

    /// Last level; clearing it wins the game
    #[arg(long, default_value = "4")]
    pub(crate) max_level: u8,

    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

impl GameArgs {
    /// Build and check the game configuration.
    pub(crate) fn config(&self) -> Result<GameConfig, CliError> {
        let config = GameConfig {
            board_size: self.board_size,
            squad_size: self.squad_size,
            max_level: self.max_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// The requested seed, or one derived from the clock.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        })
    }
}

/// Default save file location.
pub(crate) fn default_save_path() -> PathBuf {
    PathBuf::from("tactica-save.json")
}

/// Install the tracing subscriber.
///
/// Events go to `log` when given, otherwise to stderr. `RUST_LOG` overrides
/// the default `info` filter.
pub(crate) fn init_logging(log: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match log {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::new(format!("Failed to create log file {}: {e}", path.display()))
            })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to install logger: {e}")))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}
