//! Index loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or decoding a search index
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read index {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Index request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed index payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LoadError {
    /// Check if retrying the same load could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Io { .. } => false,
            LoadError::Http(_) => true,
            LoadError::Status { status, .. } => *status >= 500,
            LoadError::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err = LoadError::Io {
            path: PathBuf::from("/srv/blog/search-index.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/srv/blog/search-index.json"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_retryable() {
        let server = LoadError::Status {
            url: "https://blog.example/search-index.json".to_string(),
            status: 503,
        };
        let missing = LoadError::Status {
            url: "https://blog.example/search-index.json".to_string(),
            status: 404,
        };

        assert!(server.is_retryable());
        assert!(!missing.is_retryable());
        assert!(missing.to_string().contains("404"));
    }

    #[test]
    fn test_decode_from_serde() {
        let err: LoadError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
