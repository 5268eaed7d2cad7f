//! Index loaders - fetch and decode `search-index.json`

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::LoadError;
use crate::post::SearchIndex;

/// Source of a search index.
///
/// Implementations perform the I/O and decoding; the store only applies a
/// fully decoded index.
#[async_trait]
pub trait IndexLoader: Send + Sync {
    /// Fetch and decode the index
    async fn load(&self) -> Result<SearchIndex, LoadError>;

    /// Human-readable description of the source, for logs and messages
    fn describe(&self) -> String;
}

/// Loads the index from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl IndexLoader for FileLoader {
    async fn load(&self) -> Result<SearchIndex, LoadError> {
        debug!(path = %self.path.display(), "FileLoader::load: reading");
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        let index = SearchIndex::from_json(&content)?;
        debug!(post_count = index.posts.len(), "FileLoader::load: decoded");
        Ok(index)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Loads the index from a published site over HTTP
#[derive(Debug, Clone)]
pub struct HttpLoader {
    url: String,
    client: reqwest::Client,
}

impl HttpLoader {
    /// Create a loader for `url` with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url: url.into(), client })
    }
}

#[async_trait]
impl IndexLoader for HttpLoader {
    async fn load(&self) -> Result<SearchIndex, LoadError> {
        debug!(url = %self.url, "HttpLoader::load: fetching");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "HttpLoader::load: non-success status");
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let index = SearchIndex::from_json(&body)?;
        debug!(post_count = index.posts.len(), "HttpLoader::load: decoded");
        Ok(index)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
