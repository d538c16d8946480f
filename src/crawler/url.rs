//! URL canonicalization and exclusion filtering
//!
//! The canonicalizer collapses equivalent addresses (trailing slash,
//! fragment) to one identity so the visited set can deduplicate reliably.
//! The exclusion filter is the only access-control mechanism: same origin
//! as the configured base, minus a deny list of URL substrings.

use url::{Origin, Url};

use super::CrawlerConfig;

/// Normalize a raw URL into its canonical string identity.
///
/// Resolves `raw` as an absolute URL, or relative against `base`. Drops the
/// fragment and strips trailing slashes from the path. On parse failure the
/// input is returned unchanged; the filter rejects it downstream.
pub fn canonicalize(raw: &str, base: &Url) -> String {
    let mut parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(_) => match base.join(raw) {
            Ok(u) => u,
            Err(_) => return raw.to_string(),
        },
    };

    parsed.set_fragment(None);

    if parsed.path().ends_with('/') && parsed.path() != "/" {
        let trimmed = parsed.path().trim_end_matches('/').to_string();
        parsed.set_path(&trimmed);
    }

    parsed.to_string()
}

/// Pure predicate deciding which URLs are off-limits for the crawl
#[derive(Debug, Clone)]
pub struct UrlFilter {
    origin: Origin,
    deny_substrings: Vec<String>,
}

impl UrlFilter {
    /// Build a filter from the configured target origin and deny list
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            origin: config.base_url.origin(),
            deny_substrings: config.deny_substrings.clone(),
        }
    }

    /// Returns true when `url` must not be fetched or enqueued.
    ///
    /// Excluded: unparseable URLs, URLs on a foreign origin, and URLs
    /// containing any configured deny substring.
    pub fn is_excluded(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return true,
        };

        if parsed.origin() != self.origin {
            return true;
        }

        self.deny_substrings.iter().any(|deny| url.contains(deny))
    }
}
