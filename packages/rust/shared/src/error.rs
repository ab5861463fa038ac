//! Error types shared across the Tokyon crates.
//!
//! Library crates use [`TokyonError`] via `thiserror` for configuration and
//! I/O concerns; domain crates layer their own classified errors on top.
//! The `tokyon` binary wraps everything with `color-eyre`.

use std::path::PathBuf;

/// Infrastructure-level error type (configuration, I/O, HTTP client setup).
#[derive(Debug, thiserror::Error)]
pub enum TokyonError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP client error.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed payload or document.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TokyonError>;

impl TokyonError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
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
