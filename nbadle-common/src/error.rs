//! Common error types for NBA-dle

use thiserror::Error;

/// Common result type for NBA-dle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across NBA-dle crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (roster file, provider payloads)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or data file content
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
