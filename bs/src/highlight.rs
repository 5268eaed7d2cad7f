//! Keyword highlighting for display

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// Wraps keyword occurrences in open/close markers
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MARK_OPEN, crate::DEFAULT_MARK_CLOSE)
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Mark every case-insensitive occurrence of each keyword in `text`.
    ///
    /// Longer keywords are applied first. Matches are tracked as byte ranges
    /// of `text`; a later keyword only searches the gaps between earlier
    /// matches, so overlapping keywords mark a span once. Marker strings that
    /// already appear in `text` are ordinary text.
    pub fn highlight<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut ordered: Vec<&str> = keywords.iter().map(|k| k.as_ref()).filter(|k| !k.is_empty()).collect();
        if ordered.is_empty() {
            return text.to_string();
        }
        // Stable, so equal-length keywords keep query order
        ordered.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));

        let mut marked: Vec<Range<usize>> = Vec::new();
        for keyword in ordered {
            // Simple case folding; `str::to_lowercase` in the engine can match a
            // few titles (dotted capital I) that are then left unmarked here
            let pattern = match RegexBuilder::new(&regex::escape(keyword)).case_insensitive(true).build() {
                Ok(p) => p,
                Err(e) => {
                    warn!(%keyword, error = %e, "Highlighter::highlight: skipping keyword");
                    continue;
                }
            };
            let found = unmarked_matches(text, &marked, &pattern);
            marked.extend(found);
            marked.sort_by_key(|r| r.start);
        }

        let output = self.render(text, &marked);
        debug!(input_len = text.len(), marks = marked.len(), "Highlighter::highlight: done");
        output
    }

    /// Build the output once, wrapping each marked range
    fn render(&self, text: &str, marked: &[Range<usize>]) -> String {
        let extra = marked.len() * (self.open.len() + self.close.len());
        let mut out = String::with_capacity(text.len() + extra);
        let mut cursor = 0;

        for range in marked {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&self.open);
            out.push_str(&text[range.clone()]);
            out.push_str(&self.close);
            cursor = range.end;
        }

        out.push_str(&text[cursor..]);
        out
    }
}

/// Matches of `pattern` in the gaps of `text` between the sorted `marked` ranges
fn unmarked_matches(text: &str, marked: &[Range<usize>], pattern: &Regex) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut gap_start = 0;

    let gap_ends = marked.iter().map(|r| (r.start, r.end)).chain(std::iter::once((text.len(), text.len())));
    for (gap_end, next_start) in gap_ends {
        for m in pattern.find_iter(&text[gap_start..gap_end]) {
            if !m.is_empty() {
                found.push(gap_start + m.start()..gap_start + m.end());
            }
        }
        gap_start = next_start;
    }

    found
}

/// Highlight with the default `<mark>` markers
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> String {
    Highlighter::default().highlight(text, keywords)
}
