//! Asset fetchers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SourceError;

/// Something that can produce the body of a named asset.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Human-readable fetcher name (e.g. "fs").
    fn name(&self) -> &str;

    /// Fetch an asset body as text.
    async fn fetch(&self, path: &str) -> Result<String, SourceError>;
}

/// Reads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetFetcher for FsFetcher {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let full = self.root.join(path);
        tracing::debug!("reading {}", full.display());
        tokio::fs::read_to_string(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(full.display().to_string())
            } else {
                SourceError::Io {
                    path: full.display().to_string(),
                    source: e,
                }
            }
        })
    }
}
