//! Error types for bookfinder.

use thiserror::Error;

use crate::catalog::SearchError;

/// bookfinder error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to open {url}: {reason}")]
    Open { url: String, reason: String },
}

/// Result type alias for bookfinder operations.
pub type Result<T> = std::result::Result<T, Error>;
