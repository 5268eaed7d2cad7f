//! BlogSearch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{FileLoader, Highlighter, HttpLoader, IndexLoader};

/// Main BlogSearch configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to load the search index from
    pub index: IndexConfig,

    /// Query limits
    pub search: SearchConfig,

    /// Highlight markers
    pub highlight: HighlightConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load or fail loudly
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .blogsearch.yml
        let local_config = PathBuf::from(".blogsearch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/blogsearch/blogsearch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("blogsearch").join("blogsearch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Build the loader for the configured index source; a URL wins over a path
    pub fn loader(&self) -> Result<Box<dyn IndexLoader>> {
        if let Some(url) = &self.index.url {
            let loader = HttpLoader::new(url.clone(), Duration::from_millis(self.index.timeout_ms))
                .context("Failed to build HTTP client")?;
            return Ok(Box::new(loader));
        }
        Ok(Box::new(FileLoader::new(&self.index.path)))
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.highlight.open.clone(), self.highlight.close.clone())
    }
}

/// Index source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Local `search-index.json`
    pub path: PathBuf,

    /// Published `search-index.json`; takes precedence over `path`
    pub url: Option<String>,

    /// HTTP request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("public/search-index.json"),
            url: None,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries are cut to this many characters before parsing
    #[serde(rename = "max-query-chars")]
    pub max_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_chars: crate::DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub open: String,
    pub close: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            open: crate::DEFAULT_MARK_OPEN.to_string(),
            close: crate::DEFAULT_MARK_CLOSE.to_string(),
        }
    }
}
