//! Error type shared by the solvers, the loader and the report writer.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum TspError {
    /// The instance or distance matrix cannot be searched
    /// (too few cities, non-finite distances, malformed tour).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A solver or experiment configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The instance text is structurally broken.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, TspError>;
