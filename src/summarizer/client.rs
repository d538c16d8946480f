//! Client for the external summarization service
//!
//! Sends a bounded excerpt of an extracted page to the Gemini
//! generateContent endpoint and returns a short synopsis. Sampling runs at
//! low temperature with a bounded output length so repeated crawls produce
//! stable summaries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use super::Summarize;
use super::error::SummarizeError;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::crawler::PageContent;

/// Environment variable holding the service credential
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Character budget for the body excerpt sent with each request
const BODY_EXCERPT_CHARS: usize = 1500;
const SUMMARY_TEMPERATURE: f32 = 0.1;
const SUMMARY_MAX_OUTPUT_TOKENS: i32 = 120;

/// Summarizer backed by the Gemini generateContent API
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiSummarizer {
    /// Create a summarizer with the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a summarizer for a specific model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a summarizer from the environment, or `None` when the
    /// credential is unset or empty
    pub fn from_env() -> Option<Self> {
        std::env::var(GEMINI_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, self.model
        )
    }

    fn build_prompt(page: &PageContent) -> String {
        format!(
            "Summarize this web page in one or two sentences for a site search index.\n\n\
             Title: {}\n\
             Headings: {}\n\n\
             Content:\n{}",
            page.title,
            page.headings,
            excerpt(&page.body)
        )
    }
}

/// Truncate `body` to the excerpt character budget on a char boundary
fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[cfg(test)]
impl GeminiSummarizer {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

#[async_trait]
impl Summarize for GeminiSummarizer {
    #[instrument(skip(self, page), fields(title = %page.title))]
    async fn summarize(&self, page: &PageContent) -> Result<String, SummarizeError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(Self::build_prompt(page))],
            generation_config: GenerationConfig {
                temperature: SUMMARY_TEMPERATURE,
                max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
            },
        };

        debug!("Requesting summary from {}", self.model);
        let response = self
            .client
            .post(self.request_url())
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SummarizeError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            SummarizeError::UnexpectedResponse(format!("Failed to parse response: {}", e))
        })?;

        parsed
            .text()
            .ok_or_else(|| SummarizeError::UnexpectedResponse("response had no text".to_string()))
    }
}
