//! Error types for nbrender-core.

use thiserror::Error;

use crate::model::CellId;

/// Result type for nbrender-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nbrender-core.
///
/// Rendering itself degrades gracefully on incomplete input; these errors
/// cover broken document invariants and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A cell id listed in the display order has no entry in the cell map.
    #[error("cell {0} is listed in cell order but missing from the cell map")]
    MissingCell(CellId),

    /// Invalid render configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to deserialize JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
