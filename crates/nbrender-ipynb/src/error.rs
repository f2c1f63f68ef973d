//! Error types for the notebook reader.

use std::path::PathBuf;

/// Result type for reader operations.
pub type IpynbResult<T> = Result<T, IpynbError>;

/// Errors that can occur while reading a notebook file.
#[derive(Debug, thiserror::Error)]
pub enum IpynbError {
    /// Failed to read the notebook file.
    #[error("Failed to read file {}: {message}", .path.display())]
    ReadError { path: PathBuf, message: String },

    /// Failed to deserialize JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The file uses an nbformat major version this reader does not handle.
    #[error("Unsupported nbformat {major}.{minor} (only version 4 is supported)")]
    UnsupportedFormat { major: u32, minor: u32 },

    /// The converted document is inconsistent.
    #[error("Invalid notebook: {0}")]
    InvalidNotebook(#[from] nbrender_core::Error),
}
