//! Post records and the search index payload

use serde::{Deserialize, Deserializer, Serialize};

/// A single post as written to `search-index.json` by the site generator.
///
/// Every field is optional in the payload. Missing or `null` values decode
/// to an empty string or an empty tag list, so matching code never has to
/// distinguish "absent" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title, matched against keywords
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Tag labels in the order the author listed them
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// ISO-8601 publication date
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    /// Site-relative link to the rendered post
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Source path relative to the markdown directory, without extension
    #[serde(default, deserialize_with = "null_as_default")]
    pub relative_path: String,
}

impl Post {
    /// Create a post with a title and tags, leaving the other fields empty
    pub fn new(title: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            title: title.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// The whole `search-index.json` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Posts in generator order (newest first)
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,

    /// When the generator wrote the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    /// Post count as recorded by the generator; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<usize>,
}

impl SearchIndex {
    /// Decode an index from JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
