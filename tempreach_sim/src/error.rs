//! Error types for batch runs and result tooling.

use tempreach_core::ReachError;
use tempreach_env::EnvError;
use thiserror::Error;

/// Errors that abort a batch run or a plot export.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Network could not be loaded
    #[error(transparent)]
    Env(#[from] EnvError),

    /// Simulation parameters rejected by the engine
    #[error(transparent)]
    Reach(#[from] ReachError),

    /// Output file or directory could not be written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Result table could not be encoded or decoded
    #[error("Result table error on {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Plot spec serialization failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generator or batch configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BatchError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Creates a result table error for the given path.
    pub fn table(path: impl std::fmt::Display, source: csv::Error) -> Self {
        Self::Table {
            path: path.to_string(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
