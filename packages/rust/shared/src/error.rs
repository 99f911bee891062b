//! Error types for Rollcall.
//!
//! Library crates use [`RollcallError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Rollcall operations.
#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    /// Congress or session number outside the supported bounds.
    #[error("invalid range: {message}")]
    InvalidRange { message: String },

    /// A categorical decoder met a string outside its known set.
    #[error("unrecognized {kind}: {value:?}")]
    UnrecognizedValue { kind: &'static str, value: String },

    /// Retrieval of a remote document failed.
    #[error("fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// XML parsing or field conversion error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing an output table failed.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RollcallError>;

impl RollcallError {
    /// Create a range error from any displayable message.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: msg.into(),
        }
    }

    /// Create an unrecognized-value error for the given decoder kind.
    pub fn unrecognized(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnrecognizedValue {
            kind,
            value: value.into(),
        }
    }

    /// Create a fetch error for a URL.
    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

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
