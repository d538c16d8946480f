//! Error types for the index module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for index persistence operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<IndexError> for CrateError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Json(e) => CrateError::Json(e),
            _ => CrateError::Index(err.to_string()),
        }
    }
}
