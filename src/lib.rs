//! # sitescout - Site Crawler and Index Builder
//!
//! This crate implements a bounded, polite, depth-limited web crawler that
//! discovers the pages of a single target site, extracts and summarizes their
//! content, and persists a queryable index for a downstream assistant.
//!
//! ## Features
//!
//! - Explicit-frontier traversal with hard depth and page-count ceilings
//! - Canonical URL deduplication and a configurable exclusion list
//! - Per-page failure isolation: one bad page never aborts a run
//! - Best-effort LLM summarization with a title fallback
//! - Atomic, overwrite-on-success index persistence with substring search
//! - Daily scheduling with an operator-invokable manual trigger
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitescout::crawler::{Crawler, CrawlerConfig};
//! use sitescout::index::IndexStore;
//! use sitescout::summarizer::TitleFallbackSummarizer;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = url::Url::parse("https://talent.example.com")?;
//!     let config = CrawlerConfig::builder(base)
//!         .max_depth(2)
//!         .max_pages(50)
//!         .build();
//!
//!     let crawler = Crawler::new(config, TitleFallbackSummarizer)?;
//!     let index = crawler.run(&CancellationToken::new()).await?;
//!
//!     IndexStore::new("site_index.json").save(&index).await?;
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod index;
pub mod scheduler;
pub mod summarizer;

pub use error::Error;

/// Re-export of commonly used types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
