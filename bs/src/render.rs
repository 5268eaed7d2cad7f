//! Terminal and JSON rendering of search results

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use colored::*;
use serde::Serialize;

use crate::{Highlighter, Post, SearchOutcome};

const ANSI_MARK_OPEN: &str = "\x1b[1;33m";
const ANSI_MARK_CLOSE: &str = "\x1b[0m";

/// Format an ISO-8601 date or datetime as `YYYY-MM-DD`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Render results for a terminal.
///
/// Keyword marks become bold yellow when colour is enabled, otherwise the
/// configured markers are kept as-is.
pub fn render_text(raw: &str, outcome: &SearchOutcome, highlighter: &Highlighter, limit: Option<usize>) -> String {
    if outcome.posts.is_empty() {
        return if raw.trim().is_empty() {
            "No posts in index".to_string()
        } else {
            format!("No posts match \"{}\"", raw.trim())
        };
    }

    let marker = if colored::control::SHOULD_COLORIZE.should_colorize() {
        Highlighter::new(ANSI_MARK_OPEN, ANSI_MARK_CLOSE)
    } else {
        highlighter.clone()
    };

    let shown = limit.unwrap_or(outcome.posts.len()).min(outcome.posts.len());
    let mut lines = Vec::with_capacity(shown * 3 + 1);

    for post in &outcome.posts[..shown] {
        let title = if post.title.is_empty() { "(untitled)" } else { post.title.as_str() };
        lines.push(format!(
            "{}  {}",
            marker.highlight(title, &outcome.query.keywords),
            format_date(&post.date).dimmed()
        ));
        if !post.tags.is_empty() {
            let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t)).collect();
            lines.push(format!("    {}", tags.join(" ").cyan()));
        }
        if !post.url.is_empty() {
            lines.push(format!("    {}", post.url.blue()));
        }
    }

    if shown < outcome.posts.len() {
        lines.push(format!("... {} more", outcome.posts.len() - shown).dimmed().to_string());
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonPost<'a> {
    #[serde(flatten)]
    post: &'a Post,
    title_marked: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a crate::ParsedQuery,
    total: usize,
    notices: &'a [crate::Notice],
    posts: Vec<JsonPost<'a>>,
}

/// Render results as a JSON document with marked titles
pub fn render_json(
    outcome: &SearchOutcome,
    highlighter: &Highlighter,
    limit: Option<usize>,
) -> Result<String, serde_json::Error> {
    let shown = limit.unwrap_or(outcome.posts.len()).min(outcome.posts.len());
    let report = JsonReport {
        query: &outcome.query,
        total: outcome.posts.len(),
        notices: &outcome.notices,
        posts: outcome.posts[..shown]
            .iter()
            .map(|post| JsonPost {
                post,
                title_marked: highlighter.highlight(&post.title, &outcome.query.keywords),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
