//! Page summarization
//!
//! Summarization is an injected capability behind the [`Summarize`] trait:
//! the crawler treats it as a quality enhancement, never a correctness
//! dependency, and falls back to the page title whenever a summarizer
//! errors. [`GeminiSummarizer`] talks to the external language service;
//! [`TitleFallbackSummarizer`] is the no-network default used in disabled
//! mode and in tests.

mod client;
mod error;
mod types;

pub use client::{GEMINI_API_KEY_VAR, GeminiSummarizer};
pub use error::SummarizeError;

use async_trait::async_trait;

use crate::crawler::PageContent;

/// A strategy producing a short synopsis of an extracted page
#[async_trait]
pub trait Summarize: Send + Sync {
    /// Produce a one-to-two sentence synopsis of `page`.
    async fn summarize(&self, page: &PageContent) -> Result<String, SummarizeError>;
}

/// Summarizer that echoes the page title, used when no external service
/// is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFallbackSummarizer;

#[async_trait]
impl Summarize for TitleFallbackSummarizer {
    async fn summarize(&self, page: &PageContent) -> Result<String, SummarizeError> {
        Ok(page.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_title_fallback_echoes_title() {
        let page = PageContent {
            title: "Talent Portal".to_string(),
            headings: "Welcome".to_string(),
            body: "Find work here.".to_string(),
        };

        let summary = TitleFallbackSummarizer.summarize(&page).await.unwrap();
        assert_eq!(summary, "Talent Portal");
    }
}
