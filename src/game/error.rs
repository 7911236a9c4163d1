use std::path::PathBuf;

use thiserror::Error;

/// Hard failures of the rules engine. Collisions are not errors: they end the
/// run through the `GameOver` state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no free cell left to spawn into ({occupied} of {capacity} cells occupied)")]
    SpawnExhausted { occupied: usize, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type GameResult<T> = Result<T, GameError>;
