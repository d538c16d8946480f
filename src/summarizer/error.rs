//! Error types for the summarizer module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for summarization calls
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<SummarizeError> for CrateError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::Http(e) => CrateError::Http(e),
            _ => CrateError::Summarize(err.to_string()),
        }
    }
}
