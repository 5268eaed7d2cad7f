//! Query engine - filters the loaded index by tags and title keywords

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::post::Post;
use crate::query::{ParsedQuery, parse};
use crate::store::IndexStore;

/// Diagnostics produced while running a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The index has not been loaded; the result is empty
    NotLoaded,
    /// The query was cut to `kept` characters before parsing
    Truncated { original: usize, kept: usize },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "search index is not loaded"),
            Self::Truncated { original, kept } => {
                write!(f, "query truncated from {} to {} characters", original, kept)
            }
        }
    }
}

/// Everything a single search produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    /// Parsed form of the (possibly truncated) query
    pub query: ParsedQuery,

    /// Matching posts in index order
    pub posts: Vec<Post>,

    pub notices: Vec<Notice>,
}

/// Runs queries against an [`IndexStore`]
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: Arc<IndexStore>,
    max_query_chars: usize,
}

impl QueryEngine {
    pub fn new(store: Arc<IndexStore>) -> Self {
        Self {
            store,
            max_query_chars: crate::DEFAULT_MAX_QUERY_CHARS,
        }
    }

    /// Override the truncation limit for incoming queries
    pub fn with_max_query_chars(mut self, max_query_chars: usize) -> Self {
        self.max_query_chars = max_query_chars;
        self
    }

    pub fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    /// Matching posts for `raw`, in index order
    pub fn search(&self, raw: &str) -> Vec<Post> {
        self.run(raw).posts
    }

    /// Run `raw` and return the parsed query and notices along with the posts
    pub fn run(&self, raw: &str) -> SearchOutcome {
        debug!(%raw, "QueryEngine::run: called");
        let snapshot = self.store.snapshot();

        if !snapshot.loaded {
            warn!("QueryEngine::run: index not loaded");
            return SearchOutcome {
                notices: vec![Notice::NotLoaded],
                ..Default::default()
            };
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!("QueryEngine::run: empty query, returning full index");
            return SearchOutcome {
                posts: snapshot.posts.clone(),
                ..Default::default()
            };
        }

        let mut notices = Vec::new();
        let original = raw.chars().count();
        let query = if original > self.max_query_chars {
            warn!(original, kept = self.max_query_chars, "QueryEngine::run: query truncated");
            notices.push(Notice::Truncated {
                original,
                kept: self.max_query_chars,
            });
            let cut: String = raw.chars().take(self.max_query_chars).collect();
            parse(&cut)
        } else {
            parse(raw)
        };

        if query.is_empty() {
            debug!("QueryEngine::run: nothing requested, returning full index");
            return SearchOutcome {
                query,
                posts: snapshot.posts.clone(),
                notices,
            };
        }

        let matcher = Matcher::new(&query);
        let posts: Vec<Post> = snapshot.posts.iter().filter(|p| matcher.matches(p)).cloned().collect();

        debug!(matched = posts.len(), total = snapshot.posts.len(), "QueryEngine::run: filtered");
        SearchOutcome { query, posts, notices }
    }
}

/// Case-folded form of a parsed query
struct Matcher {
    tags: Vec<String>,
    keywords: Vec<String>,
}

impl Matcher {
    fn new(query: &ParsedQuery) -> Self {
        Self {
            tags: query.tags.iter().map(|t| t.to_lowercase()).collect(),
            keywords: query.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, post: &Post) -> bool {
        self.tags_match(post) && self.keywords_match(post)
    }

    /// Every requested tag is contained in at least one post tag
    fn tags_match(&self, post: &Post) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        let post_tags: Vec<String> = post.tags.iter().map(|t| t.to_lowercase()).collect();
        self.tags
            .iter()
            .all(|wanted| post_tags.iter().any(|have| have.contains(wanted.as_str())))
    }

    /// Every keyword is contained in the title
    fn keywords_match(&self, post: &Post) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let title = post.title.to_lowercase();
        self.keywords.iter().all(|k| title.contains(k.as_str()))
    }
}
