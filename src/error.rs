//! Error types for the flowwatch dashboard
//!
//! Structured error definitions use thiserror; the binary propagates them
//! through anyhow at the top level.

use thiserror::Error;

/// Failure of a single feed retrieval.
///
/// The `Display` text is what the dashboard shows in place of the record list,
/// so keep it readable.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("Could not reach the error feed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Error feed answered with HTTP {0}")]
    Status(u16),

    /// Local feed file could not be read
    #[error("Could not read the error feed: {0}")]
    Io(#[from] std::io::Error),

    /// Body was not a JSON list of error records
    #[error("Error feed is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Main error type for flowwatch operations
#[derive(Error, Debug)]
pub enum FlowwatchError {
    /// Config file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Feed retrieval failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for flowwatch operations
pub type Result<T> = std::result::Result<T, FlowwatchError>;
