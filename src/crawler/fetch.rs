//! Page fetching for the crawler module
//!
//! One rate-unaware HTTP GET per call; pacing lives in the orchestrator.
//! Failures carry the URL and cause and are never fatal to a crawl run.

use reqwest::{Client as ReqwestClient, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::CrawlerConfig;
use super::error::CrawlError;

/// A successfully fetched page before extraction
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL the page was fetched from
    pub url: String,

    /// Response status
    pub status: StatusCode,

    /// Raw markup of the response body
    pub body: String,
}

/// Error for a single failed fetch, terminal for that URL within the run
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("request to {url} failed: {source}")]
    Request {
        /// URL that failed
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} returned status {status}")]
    Status {
        /// URL that failed
        url: String,
        /// Response status
        status: StatusCode,
    },
}

/// HTTP client for fetching pages of the target site
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: ReqwestClient,
}

impl PageFetcher {
    /// Create a fetcher with the configured timeout and user agent
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Issue one GET for `url`.
    ///
    /// Success yields the body and status; any network error, timeout, or
    /// non-2xx status yields a [`FetchError`]. No retries are performed.
    pub async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        Ok(RawPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
