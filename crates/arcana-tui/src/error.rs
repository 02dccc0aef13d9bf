//! Errors surfaced by the `arcana` binary

use std::path::PathBuf;

use thiserror::Error;

use arcana_core::ParseError;
use arcana_core::world::OptionsError;
use arcana_save::SaveError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("options file: {0}")]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Character(#[from] ParseError),

    #[error("save file: {0}")]
    Save(#[from] SaveError),

    #[error("cannot load {}: {source} (run with --new to start over)", .path.display())]
    UnreadableSave { path: PathBuf, source: SaveError },
}
