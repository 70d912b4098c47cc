use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read level table {path}: {source}")]
    LevelFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level table is not valid TOML: {0}")]
    LevelParse(#[from] toml::de::Error),

    #[error("invalid level table: {0}")]
    InvalidLevel(String),
}
