//! BlogSearch - in-memory search over a static blog's post index
//!
//! Resolves free-text queries (optionally containing `#tag` tokens) against
//! the `search-index.json` produced by the blog generator, and marks keyword
//! occurrences for display.
//!
//! # Architecture
//!
//! ```text
//! IndexLoader (file / http) ──load──> IndexStore ──snapshot──> QueryEngine
//!                                                                  │
//!                                     parse() ──> ParsedQuery ─────┤
//!                                                                  v
//!                                      Highlighter <── keywords ── SearchOutcome
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blogsearch::{FileLoader, IndexStore, QueryEngine};
//!
//! let store = Arc::new(IndexStore::new());
//! store.load_from(&FileLoader::new("public/search-index.json")).await?;
//!
//! let engine = QueryEngine::new(store);
//! let posts = engine.search("#rust async");
//! ```

pub mod cli;
pub mod config;
mod engine;
mod error;
mod highlight;
mod loader;
mod post;
mod query;
pub mod render;
mod store;

pub use engine::{Notice, QueryEngine, SearchOutcome};
pub use error::LoadError;
pub use highlight::{Highlighter, highlight};
pub use loader::{FileLoader, HttpLoader, IndexLoader};
pub use post::{Post, SearchIndex};
pub use query::{ParsedQuery, parse, parse_optional};
pub use store::{IndexSnapshot, IndexStore};

/// Queries longer than this many characters are truncated before parsing
pub const DEFAULT_MAX_QUERY_CHARS: usize = 200;

/// Default marker placed before a highlighted keyword
pub const DEFAULT_MARK_OPEN: &str = "<mark>";

/// Default marker placed after a highlighted keyword
pub const DEFAULT_MARK_CLOSE: &str = "</mark>";
