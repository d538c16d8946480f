//! Error types for the sitescout crate

use thiserror::Error;

/// Result type for sitescout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sitescout operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Summarization error
    #[error("Summarize error: {0}")]
    Summarize(String),

    /// Index persistence error
    #[error("Index error: {0}")]
    Index(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
