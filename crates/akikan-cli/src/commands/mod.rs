pub mod config_ops;
pub mod lane_ops;
pub mod phrase_ops;

use std::fs;
use std::path::{Path, PathBuf};

use akikan_engine::akikan_core::phonetic::RomanizeError;
use akikan_engine::akikan_core::supply::SupplyError;
use akikan_engine::akikan_session::{KeyEvent, PhraseSessionError};
use akikan_engine::EngineError;

/// Stands for Backspace in `--keys` strings.
pub const BACKSPACE_KEY: char = '<';

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Romanize(#[from] RomanizeError),
    #[error(transparent)]
    Supply(#[from] SupplyError),
    #[error(transparent)]
    Session(#[from] PhraseSessionError),
}

pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn a `--keys` string into key events; `<` is Backspace.
pub fn parse_keys(keys: &str) -> Vec<KeyEvent> {
    keys.chars()
        .map(|c| match c {
            BACKSPACE_KEY => KeyEvent::Backspace,
            c => KeyEvent::Char(c),
        })
        .collect()
}
