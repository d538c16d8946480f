//! Crawl orchestration
//!
//! Drives a depth-bounded, page-count-bounded traversal over the fetch →
//! extract → summarize pipeline with an explicit frontier. All traversal
//! state lives in a run-scoped context, so repeated runs cannot interfere
//! and total work is bounded by `min(max_pages, reachable pages)`.

use std::collections::{HashSet, VecDeque};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::error::CrawlError;
use super::extract::{discover_links, extract};
use super::fetch::PageFetcher;
use super::pacing::PacingPolicy;
use super::url::{UrlFilter, canonicalize};
use super::{CrawledPage, CrawlerConfig, SiteIndex};
use crate::summarizer::Summarize;

/// Ephemeral traversal state for one crawl run
struct CrawlContext {
    visited: HashSet<String>,
    frontier: VecDeque<(String, u32)>,
    pages: Vec<CrawledPage>,
}

impl CrawlContext {
    fn seeded(base: &str) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back((base.to_string(), 0));
        Self {
            visited: HashSet::new(),
            frontier,
            pages: Vec::new(),
        }
    }
}

/// Site crawler over a fetch → extract → summarize pipeline
pub struct Crawler<S> {
    config: CrawlerConfig,
    filter: UrlFilter,
    fetcher: PageFetcher,
    summarizer: S,
    pacing: PacingPolicy,
}

impl<S: Summarize> Crawler<S> {
    /// Create a crawler with pacing taken from the configuration
    pub fn new(config: CrawlerConfig, summarizer: S) -> Result<Self, CrawlError> {
        let pacing = PacingPolicy::per_page(config.page_delay());
        Self::with_pacing(config, summarizer, pacing)
    }

    /// Create a crawler with an explicit pacing policy
    pub fn with_pacing(
        config: CrawlerConfig,
        summarizer: S,
        pacing: PacingPolicy,
    ) -> Result<Self, CrawlError> {
        let filter = UrlFilter::new(&config);
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self {
            config,
            filter,
            fetcher,
            summarizer,
            pacing,
        })
    }

    /// Run one full crawl and build the resulting index.
    ///
    /// Individual page failures are logged and skipped; only cancellation
    /// or an orchestration-level fault ends the run without an index. The
    /// caller owns persistence of the returned [`SiteIndex`].
    #[instrument(skip(self, cancel), fields(site = %self.config.base_url))]
    pub async fn run(&self, cancel: &CancellationToken) -> Result<SiteIndex, CrawlError> {
        info!("Starting crawl of {}", self.config.base_url);

        let mut ctx = CrawlContext::seeded(self.config.base_url.as_str());

        while let Some((raw_url, depth)) = ctx.frontier.pop_front() {
            if ctx.pages.len() >= self.config.max_pages {
                info!("Page limit of {} reached", self.config.max_pages);
                break;
            }
            if cancel.is_cancelled() {
                warn!("Crawl of {} cancelled", self.config.base_url);
                return Err(CrawlError::Cancelled);
            }
            if depth > self.config.max_depth {
                debug!("Skipping {} beyond depth {}", raw_url, self.config.max_depth);
                continue;
            }

            let url = canonicalize(&raw_url, &self.config.base_url);
            if ctx.visited.contains(&url) || self.filter.is_excluded(&url) {
                continue;
            }
            ctx.visited.insert(url.clone());

            self.pacing.pause().await;

            let raw_page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            let content = extract(&raw_page.body);
            let summary = match self.summarizer.summarize(&content).await {
                Ok(s) if !s.trim().is_empty() => s,
                Ok(_) => {
                    debug!("Empty summary for {}, falling back to title", url);
                    content.title.clone()
                }
                Err(e) => {
                    warn!("Summarization failed for {}: {}", url, e);
                    content.title.clone()
                }
            };

            debug!("Recorded {} ({})", url, content.title);
            ctx.pages.push(CrawledPage {
                url: url.clone(),
                title: content.title,
                summary,
                last_crawled: Utc::now(),
            });

            // Link discovery reuses the body already fetched for content
            // capture, keeping the request budget at one fetch per page.
            match url::Url::parse(&url) {
                Ok(page_url) => {
                    for link in discover_links(&raw_page.body, &page_url) {
                        let candidate = canonicalize(&link, &self.config.base_url);
                        if !ctx.visited.contains(&candidate)
                            && !self.filter.is_excluded(&candidate)
                        {
                            ctx.frontier.push_back((candidate, depth + 1));
                        }
                    }
                }
                Err(e) => warn!("Skipping link discovery for {}: {}", url, e),
            }
        }

        info!(
            "Crawl of {} complete: {} pages",
            self.config.base_url,
            ctx.pages.len()
        );
        Ok(SiteIndex::from_pages(ctx.pages))
    }
}
