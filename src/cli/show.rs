//! Show command implementation.

use super::{CliError, ShowFormat};
use std::path::PathBuf;
use tactica::persistence::{deserialize, to_json};
use tactica::render::{render_ascii, render_summary};
use tactica::{JsonFileStore, StateStore};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if there is no save at `save` or it cannot be read.
pub(crate) fn execute(save: PathBuf, format: ShowFormat, color: bool) -> Result<(), CliError> {
    let mut store = JsonFileStore::new(save);
    let record = store
        .load()?
        .ok_or_else(|| CliError::new(format!("No saved game at {}", store.path().display())))?;

    match format {
        ShowFormat::Json => println!("{}", to_json(&record)?),
        ShowFormat::Text => print!("{}", render_ascii(&deserialize(record)?, color)),
        ShowFormat::Summary => print!("{}", render_summary(&deserialize(record)?)),
    }

    Ok(())
}
