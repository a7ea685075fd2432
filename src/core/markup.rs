//! `[[wikilink]]` markup scanning and keyword normalization.
//!
//! A markup span is a `[[...]]` substring on a single line. The inner
//! text may carry a display alias (`[[target|alias]]`) and a heading
//! (`[[target#heading]]`); the target alone identifies the concept.
//!
//! Normalization is a fixed suffix heuristic, not a dictionary lookup:
//!
//! ```
//! use linkweave::core::markup::normalize_keyword;
//!
//! assert_eq!(normalize_keyword("Categories"), "category");
//! assert_eq!(normalize_keyword("Boxes"), "box");
//! assert_eq!(normalize_keyword("Cats"), "cat");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static WIKILINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\[\]\n]+?)\]\]").unwrap());

/// A single `[[...]]` span found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    /// Byte offset of the opening `[[`
    pub start: usize,

    /// Byte offset just past the closing `]]`
    pub end: usize,

    /// Raw span including brackets
    pub raw: String,

    /// Linked concept (text before `|` and `#`)
    pub target: String,

    /// Display text after `|`, if any
    pub alias: Option<String>,
}

impl MarkupSpan {
    /// Text shown to a reader once the brackets are removed
    pub fn surface(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.target)
    }

    /// Normalized keyword for this span
    pub fn keyword(&self) -> String {
        normalize_keyword(&self.target)
    }
}

/// What a rewrite pass does with a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanAction {
    /// Leave the markup in place
    Keep,

    /// Replace the span with its surface text
    Strip,
}

/// Extract every well-formed span, in document order
pub fn extract_spans(text: &str) -> Vec<MarkupSpan> {
    WIKILINK_PATTERN
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let inner = cap.get(1)?.as_str();
            let (target, alias) = parse_inner(inner)?;
            Some(MarkupSpan {
                start: whole.start(),
                end: whole.end(),
                raw: whole.as_str().to_string(),
                target,
                alias,
            })
        })
        .collect()
}

/// Split span content into (target, alias); `None` when there is no target
fn parse_inner(inner: &str) -> Option<(String, Option<String>)> {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, '|');
    let left = parts.next()?.trim();
    let alias = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let target = left.split('#').next()?.trim().to_string();
    if target.is_empty() {
        return None;
    }

    Some((target, alias))
}

/// Rewrite `text`, asking `decide` about every span left to right.
///
/// Malformed spans (e.g. `[[ ]]`) are not offered to `decide` and stay
/// untouched.
pub fn rewrite_spans<F>(text: &str, mut decide: F) -> String
where
    F: FnMut(&MarkupSpan) -> SpanAction,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in extract_spans(text) {
        out.push_str(&text[cursor..span.start]);
        match decide(&span) {
            SpanAction::Keep => out.push_str(&span.raw),
            SpanAction::Strip => out.push_str(span.surface()),
        }
        cursor = span.end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Normalize a token to its keyword form: lowercase, collapsed
/// whitespace, then the first matching suffix rule of
/// `ies` -> `y`, `es` -> drop 2, `s` -> drop 1.
pub fn normalize_keyword(raw: &str) -> String {
    let lower = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let len = lower.chars().count();

    if len > 3 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if len > 2 {
        if let Some(stem) = lower.strip_suffix("es") {
            return stem.to_string();
        }
    }
    if len > 1 {
        if let Some(stem) = lower.strip_suffix('s') {
            return stem.to_string();
        }
    }

    lower
}
