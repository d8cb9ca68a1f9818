//! Error types for the Corona theme builder.
//!
//! Library crates use [`CoronaError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all build operations.
#[derive(Debug, thiserror::Error)]
pub enum CoronaError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// One or more fragments were absent while strict mode was on.
    #[error("missing fragments: {}", names.join(", "))]
    MissingFragments { names: Vec<String> },

    /// Mirroring the build output into the destination directory failed.
    #[error("{0}")]
    Copy(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CoronaError>;

impl CoronaError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
