//! Durable storage and querying for the site index
//!
//! `save` writes the serialized index to a temporary file beside the
//! target and renames it into place, so a concurrent reader never sees a
//! partial document and a failed run leaves the previous index intact.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use super::error::IndexError;
use crate::crawler::{CrawledPage, SiteIndex};

/// Storage manager for the persisted site index
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Create a store persisting to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Persist `index`, atomically replacing any previous version.
    pub async fn save(&self, index: &SiteIndex) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(index)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;

        info!(
            "Saved index of {} pages to {}",
            index.total_pages,
            self.path.display()
        );
        Ok(())
    }

    /// Load the persisted index, or `None` when no prior index exists.
    pub async fn load(&self) -> Result<Option<SiteIndex>, IndexError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No index found at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(IndexError::Io(e)),
        };

        let index: SiteIndex = serde_json::from_str(&json)?;
        Ok(Some(index))
    }
}

/// Case-insensitive substring search over title, summary, and URL.
///
/// Returns all matching pages in their original index order; no ranking
/// and no tokenization.
pub fn search<'a>(index: &'a SiteIndex, query: &str) -> Vec<&'a CrawledPage> {
    let needle = query.to_lowercase();
    index
        .pages
        .iter()
        .filter(|page| {
            page.title.to_lowercase().contains(&needle)
                || page.summary.to_lowercase().contains(&needle)
                || page.url.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn page(url: &str, title: &str, summary: &str) -> CrawledPage {
        CrawledPage {
            url: url.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            last_crawled: Utc::now(),
        }
    }

    fn sample_index() -> SiteIndex {
        SiteIndex::from_pages(vec![
            page(
                "https://x.com/",
                "Talent Portal",
                "A marketplace connecting companies with talent",
            ),
            page("https://x.com/pricing", "Pricing", "Plans and rates"),
            page(
                "https://x.com/hiring-guide",
                "Guides",
                "How to hire great talent",
            ),
        ])
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("site_index.json"));

        let index = sample_index();
        store.save(&index).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.total_pages, 3);
        assert_eq!(loaded.pages[0].title, "Talent Portal");
        assert_eq!(loaded.last_updated, index.last_updated);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("site_index.json"));

        store.save(&sample_index()).await.unwrap();
        store
            .save(&SiteIndex::from_pages(vec![page(
                "https://x.com/",
                "Only Page",
                "Only Page",
            )]))
            .await
            .unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.total_pages, 1);
        assert_eq!(loaded.pages[0].title, "Only Page");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_index.json");
        let store = IndexStore::new(&path);

        let original = sample_index();
        store.save(&original).await.unwrap();

        // A directory squatting on the temp path makes the next write fail
        // before the rename, simulating a mid-save crash.
        std::fs::create_dir(store.temp_path()).unwrap();
        let result = store.save(&SiteIndex::from_pages(vec![])).await;
        assert!(result.is_err());

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.total_pages, original.total_pages);
        assert_eq!(loaded.pages[0].title, "Talent Portal");
    }

    #[test]
    fn test_search_containment() {
        let index = sample_index();

        let hits = search(&index, "talent");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Talent Portal");
        assert_eq!(hits[1].title, "Guides");

        assert!(search(&index, "zzz-no-match").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(search(&index, "PRICING").len(), 1);
        assert_eq!(search(&index, "pricing").len(), 1);
    }

    #[test]
    fn test_search_matches_url_and_summary() {
        let index = sample_index();
        assert_eq!(search(&index, "hiring-guide").len(), 1);
        assert_eq!(search(&index, "plans and rates").len(), 1);
    }

    #[test]
    fn test_search_preserves_order() {
        let index = sample_index();
        let hits = search(&index, "x.com");
        let urls: Vec<&str> = hits.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://x.com/",
                "https://x.com/pricing",
                "https://x.com/hiring-guide"
            ]
        );
    }
}
