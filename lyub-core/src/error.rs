//! Error types for lyub-core

use thiserror::Error;

/// Main error type for the lyub-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Category not found
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Timer lifecycle error (already running, not running)
    #[error("timer error: {0}")]
    Timer(String),
}

/// Result type alias for lyub-core
pub type Result<T> = std::result::Result<T, Error>;
