//! Error types for the tempreach environment layer.

use thiserror::Error;

/// Errors that can occur while reading or writing network files.
#[derive(Debug, Error)]
pub enum EnvError {
    /// File missing, unreadable or not writable
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Header lacks one of the required columns
    #[error("Network file {path} is missing required column '{column}'")]
    MissingColumn {
        path: String,
        column: &'static str,
    },

    /// A row could not be decoded into a contact record
    #[error("Malformed network file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Encoding contact records failed
    #[error("Failed to write network file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl EnvError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Creates a parse error for the given path.
    pub fn parse(path: impl std::fmt::Display, source: csv::Error) -> Self {
        Self::Parse {
            path: path.to_string(),
            source,
        }
    }

    /// Creates a "not found" error for a network that does not exist.
    pub fn not_found(path: impl std::fmt::Display) -> Self {
        Self::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such network"),
        )
    }
}
