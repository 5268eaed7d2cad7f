//! Query parsing
//!
//! A query is a whitespace separated list of tokens. Tokens starting with `#`
//! request a tag, everything else is a title keyword.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tags and keywords requested by a query, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// Tag tokens without the leading `#`, original case
    pub tags: Vec<String>,

    /// Keyword tokens, original case
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    /// True when the query requests nothing
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.keywords.is_empty()
    }
}

/// Parse a raw query string into tags and keywords.
///
/// Never fails: a lone `#` is dropped and runs of whitespace collapse.
/// Duplicates are kept since matching is existential.
pub fn parse(raw: &str) -> ParsedQuery {
    let mut query = ParsedQuery::default();

    for token in raw.split_whitespace() {
        match token.strip_prefix('#') {
            Some("") => continue,
            Some(tag) => query.tags.push(tag.to_string()),
            None => query.keywords.push(token.to_string()),
        }
    }

    debug!(tags = ?query.tags, keywords = ?query.keywords, "parse: done");
    query
}

/// Parse a query that may be absent
pub fn parse_optional(raw: Option<&str>) -> ParsedQuery {
    raw.map(parse).unwrap_or_default()
}
