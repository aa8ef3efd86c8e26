//! Error types for Roomforge

use thiserror::Error;

/// Result type alias using Roomforge's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Roomforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Capture file could not be decoded
    #[error("Malformed capture: {0}")]
    MalformedCapture(String),

    /// Export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
