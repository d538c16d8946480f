//! Politeness pacing for the crawler
//!
//! The inter-request delay is a policy object rather than an inline sleep,
//! so tests can inject a zero-delay policy. One pause is awaited per
//! processed page, globally, which bounds the aggregate request rate.

use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Minimum-interval pacing between page dispatches
#[derive(Clone)]
pub struct PacingPolicy {
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl PacingPolicy {
    /// Allow one page per `delay`; a zero delay disables pacing.
    pub fn per_page(delay: Duration) -> Self {
        Self {
            limiter: Quota::with_period(delay)
                .map(|quota| Arc::new(RateLimiter::direct(quota))),
        }
    }

    /// A policy that never waits, for tests and dry runs
    pub fn unpaced() -> Self {
        Self { limiter: None }
    }

    /// Wait until the next dispatch is allowed.
    ///
    /// The first call after construction returns immediately; subsequent
    /// calls wait out the remainder of the configured interval.
    pub async fn pause(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for PacingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacingPolicy")
            .field("paced", &self.limiter.is_some())
            .finish()
    }
}
