//! Crawl scheduling
//!
//! A pure trigger around the crawl pipeline: a recurring daily job at a
//! fixed wall-clock hour plus an operator-invokable manual trigger. The
//! scheduler holds no crawl state of its own; each firing builds a fresh
//! crawler and hands the finished index to the store. When the external
//! summarization service is unconfigured the recurring job is not
//! registered at all, and the disabled mode is logged.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::crawler::{Crawler, CrawlerConfig, SiteIndex};
use crate::error::Result;
use crate::index::IndexStore;
use crate::summarizer::{
    GEMINI_API_KEY_VAR, GeminiSummarizer, Summarize, TitleFallbackSummarizer,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Configuration for the crawl scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Wall-clock hour (UTC) at which the daily crawl fires
    pub trigger_hour_utc: u32,

    /// Path of the persisted index document
    pub index_path: PathBuf,

    /// Crawl parameters used by every triggered run
    pub crawler: CrawlerConfig,
}

impl SchedulerConfig {
    /// Create a configuration firing daily at 03:00 UTC
    pub fn new(crawler: CrawlerConfig, index_path: impl Into<PathBuf>) -> Self {
        Self {
            trigger_hour_utc: 3,
            index_path: index_path.into(),
            crawler,
        }
    }

    /// Override the daily trigger hour (wrapped into 0..24)
    pub fn with_trigger_hour(mut self, hour: u32) -> Self {
        self.trigger_hour_utc = hour % 24;
        self
    }
}

/// Run one full crawl and persist the resulting index.
///
/// The store is touched only after the crawl completes; a cancelled or
/// failed run leaves the previous index in place.
pub async fn run_crawl<S: Summarize>(
    config: &CrawlerConfig,
    summarizer: S,
    store: &IndexStore,
    cancel: &CancellationToken,
) -> Result<SiteIndex> {
    let crawler = Crawler::new(config.clone(), summarizer)?;
    let index = crawler.run(cancel).await?;
    store.save(&index).await?;
    Ok(index)
}

/// Daily crawl trigger with a manual escape hatch
pub struct Scheduler {
    config: SchedulerConfig,
    summarizer: Option<GeminiSummarizer>,
    cancel: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler with an explicit (possibly absent) summarizer
    pub fn new(config: SchedulerConfig, summarizer: Option<GeminiSummarizer>) -> Self {
        Self {
            config,
            summarizer,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a scheduler whose summarizer comes from the environment
    pub fn from_env(config: SchedulerConfig) -> Self {
        Self::new(config, GeminiSummarizer::from_env())
    }

    /// Request cooperative shutdown of the recurring job and any
    /// in-progress crawl
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Register the recurring daily crawl.
    ///
    /// Returns `None` without registering anything when the summarization
    /// service is unconfigured; the disabled mode is logged explicitly.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        let Some(summarizer) = self.summarizer.clone() else {
            warn!(
                "{} is not set; daily crawl schedule disabled",
                GEMINI_API_KEY_VAR
            );
            return None;
        };

        let config = self.config.clone();
        let cancel = self.cancel.clone();

        Some(tokio::spawn(async move {
            info!(
                "Registered daily crawl of {} at {:02}:00 UTC",
                config.crawler.base_url, config.trigger_hour_utc
            );
            let store = IndexStore::new(&config.index_path);

            loop {
                let wait = delay_until_hour(config.trigger_hour_utc, Utc::now());
                tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("Scheduler shut down");
                        return;
                    }
                    _ = tokio::time::sleep(wait) => {}
                }

                match run_crawl(&config.crawler, summarizer.clone(), &store, &cancel).await {
                    Ok(index) => {
                        info!("Scheduled crawl finished with {} pages", index.total_pages)
                    }
                    Err(e) => error!("Scheduled crawl failed: {}", e),
                }
            }
        }))
    }

    /// Run a full crawl immediately, for operational use.
    ///
    /// Errors are logged, not returned. Without a configured summarizer the
    /// crawl still runs and summaries fall back to page titles.
    pub async fn trigger_manual_crawl(&self) {
        let store = IndexStore::new(&self.config.index_path);

        let outcome = match self.summarizer.clone() {
            Some(summarizer) => {
                run_crawl(&self.config.crawler, summarizer, &store, &self.cancel).await
            }
            None => {
                info!("Summarizer not configured; summaries fall back to page titles");
                run_crawl(
                    &self.config.crawler,
                    TitleFallbackSummarizer,
                    &store,
                    &self.cancel,
                )
                .await
            }
        };

        match outcome {
            Ok(index) => info!("Manual crawl finished with {} pages", index.total_pages),
            Err(e) => error!("Manual crawl failed: {}", e),
        }
    }
}

/// Time remaining until the next occurrence of `hour:00` UTC.
///
/// A trigger landing exactly on the hour waits a full day, so one firing
/// cannot double-run.
fn delay_until_hour(hour: u32, now: DateTime<Utc>) -> Duration {
    let target_secs = i64::from(hour % 24) * 3600;
    let now_secs = i64::from(now.num_seconds_from_midnight());

    let mut diff = target_secs - now_secs;
    if diff <= 0 {
        diff += SECONDS_PER_DAY;
    }
    Duration::from_secs(diff as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use url::Url;

    fn crawler_config(base: &str) -> CrawlerConfig {
        CrawlerConfig::builder(Url::parse(base).unwrap())
            .page_delay_ms(0)
            .request_timeout_secs(5)
            .build()
    }

    #[test]
    fn test_delay_until_upcoming_hour() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 2, 0, 0).unwrap();
        assert_eq!(delay_until_hour(3, now), Duration::from_secs(3600));
    }

    #[test]
    fn test_delay_wraps_to_next_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 4, 30, 0).unwrap();
        assert_eq!(
            delay_until_hour(3, now),
            Duration::from_secs(22 * 3600 + 1800)
        );
    }

    #[test]
    fn test_delay_on_the_hour_waits_a_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 3, 0, 0).unwrap();
        assert_eq!(delay_until_hour(3, now), Duration::from_secs(86_400));
    }

    #[test]
    fn test_start_disabled_without_summarizer() {
        // start() must return before spawning anything when no summarizer
        // is configured, so no runtime is required here.
        let config = SchedulerConfig::new(
            crawler_config("https://talent.example.com"),
            "site_index.json",
        );
        let scheduler = Scheduler::new(config, None);
        assert!(scheduler.start().is_none());
    }

    #[tokio::test]
    async fn test_manual_crawl_persists_index() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<title>Home</title><p>Welcome to the portal.</p>")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("site_index.json");
        let config = SchedulerConfig::new(crawler_config(&server.url()), &index_path);

        let scheduler = Scheduler::new(config, None);
        scheduler.trigger_manual_crawl().await;

        let saved = IndexStore::new(&index_path).load().await.unwrap().unwrap();
        assert_eq!(saved.total_pages, 1);
        assert_eq!(saved.pages[0].title, "Home");
        // No summarizer configured, so the summary fell back to the title.
        assert_eq!(saved.pages[0].summary, "Home");
    }

    #[tokio::test]
    async fn test_cancelled_manual_crawl_keeps_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("site_index.json");
        let store = IndexStore::new(&index_path);

        let previous = SiteIndex::from_pages(vec![]);
        store.save(&previous).await.unwrap();

        let config = SchedulerConfig::new(crawler_config("http://127.0.0.1:9"), &index_path);
        let scheduler = Scheduler::new(config, None);
        scheduler.shutdown();
        scheduler.trigger_manual_crawl().await;

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.last_updated, previous.last_updated);
    }
}
