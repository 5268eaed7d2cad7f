//! In-memory index store
//!
//! The store owns the loaded collection as an immutable [`IndexSnapshot`]
//! behind an `Arc`. Loading builds a complete new snapshot and swaps it in
//! under the write lock, so readers see either the old collection or the new
//! one, never a mix.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::loader::IndexLoader;
use crate::post::{Post, SearchIndex};

/// One complete, immutable view of the index
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    /// Posts in source order
    pub posts: Vec<Post>,

    /// False until a load has succeeded
    pub loaded: bool,

    /// Generation timestamp reported by the payload, if any
    pub generated_at: Option<String>,
}

/// Holds the currently loaded index
#[derive(Debug, Default)]
pub struct IndexStore {
    current: RwLock<Arc<IndexSnapshot>>,
}

impl IndexStore {
    /// Create an empty, not-loaded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already loaded with `index`
    pub fn with_index(index: SearchIndex) -> Self {
        let store = Self::new();
        store.replace(index);
        store
    }

    /// Current snapshot; cheap to clone and never changes under the caller
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().loaded
    }

    /// Number of posts in the current snapshot
    pub fn len(&self) -> usize {
        self.snapshot().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole collection with `index` and mark the store loaded
    pub fn replace(&self, index: SearchIndex) {
        if let Some(total) = index.total_posts
            && total != index.posts.len()
        {
            warn!(total, actual = index.posts.len(), "IndexStore::replace: total_posts disagrees with payload");
        }

        let next = Arc::new(IndexSnapshot {
            posts: index.posts,
            loaded: true,
            generated_at: index.generated_at,
        });

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
        debug!(post_count = guard.posts.len(), "IndexStore::replace: snapshot swapped");
    }

    /// Run `loader` and apply its result.
    ///
    /// On failure the store keeps whatever it held before and the error is
    /// returned to the caller.
    pub async fn load_from<L>(&self, loader: &L) -> Result<usize, LoadError>
    where
        L: IndexLoader + ?Sized,
    {
        debug!(source = %loader.describe(), "IndexStore::load_from: called");
        match loader.load().await {
            Ok(index) => {
                let count = index.posts.len();
                self.replace(index);
                debug!(source = %loader.describe(), post_count = count, "Index loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(source = %loader.describe(), error = %e, "Index load failed, keeping previous state");
                Err(e)
            }
        }
    }
}
