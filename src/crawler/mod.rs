//! Site crawler module
//!
//! This module provides the bounded, polite crawl pipeline: URL
//! canonicalization and filtering, page fetching, content extraction,
//! and the frontier-driven orchestrator that produces a [`SiteIndex`].

mod config;
mod error;
mod extract;
mod fetch;
mod orchestrator;
mod pacing;
mod url;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use error::CrawlError;
pub use extract::{PageContent, discover_links, extract};
pub use fetch::{FetchError, PageFetcher, RawPage};
pub use orchestrator::Crawler;
pub use pacing::PacingPolicy;
pub use self::url::{UrlFilter, canonicalize};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per distinct URL successfully processed in a crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawledPage {
    /// Canonical URL of the page, unique within an index
    pub url: String,

    /// Best-effort extracted title
    pub title: String,

    /// Short synopsis; equals `title` when summarization fails
    pub summary: String,

    /// Instant of successful processing
    pub last_crawled: DateTime<Utc>,
}

/// The persisted corpus produced by a single crawl run
///
/// Built fresh each run and fully replacing the previous persisted
/// document on successful completion. `pages` keeps discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteIndex {
    /// Time the most recent crawl run completed
    pub last_updated: DateTime<Utc>,

    /// Always equal to `pages.len()`
    pub total_pages: usize,

    /// Crawled records in discovery order
    pub pages: Vec<CrawledPage>,
}

impl SiteIndex {
    /// Build an index from accumulated records, stamping the completion time.
    pub fn from_pages(pages: Vec<CrawledPage>) -> Self {
        Self {
            last_updated: Utc::now(),
            total_pages: pages.len(),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_counts_pages() {
        let pages = vec![
            CrawledPage {
                url: "https://example.com".to_string(),
                title: "Home".to_string(),
                summary: "The landing page".to_string(),
                last_crawled: Utc::now(),
            },
            CrawledPage {
                url: "https://example.com/about".to_string(),
                title: "About".to_string(),
                summary: "About".to_string(),
                last_crawled: Utc::now(),
            },
        ];

        let index = SiteIndex::from_pages(pages);
        assert_eq!(index.total_pages, 2);
        assert_eq!(index.total_pages, index.pages.len());
        assert_eq!(index.pages[0].url, "https://example.com");
    }

    #[test]
    fn test_index_serialization_roundtrip() {
        let index = SiteIndex::from_pages(vec![CrawledPage {
            url: "https://example.com/jobs".to_string(),
            title: "Open Roles".to_string(),
            summary: "Listings of open positions".to_string(),
            last_crawled: Utc::now(),
        }]);

        let json = serde_json::to_string(&index).unwrap();
        let back: SiteIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_pages, 1);
        assert_eq!(back.pages[0].title, "Open Roles");
        assert_eq!(back.last_updated, index.last_updated);
    }
}
