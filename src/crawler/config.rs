//! Crawler configuration
//!
//! Controls for crawl depth, page budget, politeness pacing, and the
//! exclusion list, built with a builder pattern. Defaults are suitable
//! for polite crawling of a single production site.

use std::time::Duration;
use url::Url;

/// Configuration for a crawl of one target site
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Base URL of the target site; its origin bounds the crawl
    pub base_url: Url,

    /// Maximum link depth from the base URL
    pub max_depth: u32,

    /// Maximum number of pages to record in one run
    pub max_pages: usize,

    /// Minimum delay in milliseconds between processed pages
    pub page_delay_ms: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// URLs containing any of these substrings are never crawled
    pub deny_substrings: Vec<String>,
}

impl CrawlerConfig {
    /// Create a new builder for the given target site
    pub fn builder(base_url: Url) -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new(base_url)
    }

    /// Get the politeness delay as a Duration
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for CrawlerConfig
#[derive(Debug)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default limits for the given site
    pub fn new(base_url: Url) -> Self {
        Self {
            config: CrawlerConfig {
                base_url,
                max_depth: 3,
                max_pages: 200,
                page_delay_ms: 1000,
                request_timeout_secs: 10,
                user_agent: format!("sitescout-crawler/{}", env!("CARGO_PKG_VERSION")),
                deny_substrings: vec![
                    "/admin".to_string(),
                    "/login".to_string(),
                    "/signup".to_string(),
                    "/api/".to_string(),
                    "?".to_string(),
                    "#".to_string(),
                ],
            },
        }
    }

    /// Set the maximum depth to crawl
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the maximum number of pages to crawl
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the politeness delay in milliseconds between processed pages
    pub fn page_delay_ms(mut self, page_delay_ms: u64) -> Self {
        self.config.page_delay_ms = page_delay_ms;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn request_timeout_secs(mut self, request_timeout_secs: u64) -> Self {
        self.config.request_timeout_secs = request_timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the deny list of URL substrings
    pub fn deny_substrings(mut self, deny_substrings: Vec<String>) -> Self {
        self.config.deny_substrings = deny_substrings;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}
