//! In-memory fetcher for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::fetch::AssetFetcher;

/// A fetcher serving fixed asset bodies without touching the filesystem.
///
/// Paths with no registered body come back as [`SourceError::NotFound`].
pub struct MockFetcher {
    /// Map of path → body.
    assets: HashMap<String, String>,
    /// Paths that fail with an I/O error instead.
    broken: Vec<String>,
    /// Number of fetches made.
    call_count: AtomicU32,
    /// Every path requested, in order.
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new(assets: HashMap<String, String>) -> Self {
        Self {
            assets,
            broken: Vec::new(),
            call_count: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Build from `(path, body)` pairs.
    pub fn with_assets<'a>(assets: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            assets
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Make `path` fail with a permission error.
    pub fn break_path(mut self, path: &str) -> Self {
        self.broken.push(path.to_string());
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AssetFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(path.to_string());
        }

        if self.broken.iter().any(|b| b == path) {
            return Err(SourceError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_assets() {
        let fetcher = MockFetcher::with_assets([("a.json", "{}")]).break_path("b.csv");
        assert_eq!(fetcher.fetch("a.json").await.unwrap(), "{}");
        assert!(fetcher.fetch("missing").await.unwrap_err().is_not_found());
        assert!(!fetcher.fetch("b.csv").await.unwrap_err().is_not_found());
        assert_eq!(fetcher.call_count(), 3);
        assert_eq!(fetcher.requested(), vec!["a.json", "missing", "b.csv"]);
    }
}
