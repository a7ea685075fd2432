//! Post-annotation markup rules.
//!
//! Filters drop markup the backend should not have added (proper
//! names, years, citations); duplicate suppression then keeps only the
//! first span per normalized keyword. Stripping a span always leaves
//! its surface text behind.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::core::config::RulesConfig;
use crate::core::markup::{rewrite_spans, MarkupSpan, SpanAction};

// Two or more words, each starting with an uppercase letter
static PROPER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}[\p{L}\p{M}'.\-]*(?:\s+\p{Lu}[\p{L}\p{M}'.\-]*)+$").unwrap());

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

// `@key` citations and `scheme://` links
static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:@|[A-Za-z][A-Za-z0-9+.\-]*://)").unwrap());

/// Toggle-able markup rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    pub filter_names: bool,
    pub filter_references: bool,
    pub suppress_duplicates: bool,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            filter_names: true,
            filter_references: true,
            suppress_duplicates: true,
        }
    }
}

impl RuleEngine {
    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            filter_names: config.filter_names,
            filter_references: config.filter_references,
            suppress_duplicates: config.suppress_duplicates,
        }
    }

    /// Apply the enabled rules to `text`
    pub fn apply(&self, text: &str) -> String {
        let filtered = if self.filter_names || self.filter_references {
            rewrite_spans(text, |span| {
                if self.is_filtered(span) {
                    SpanAction::Strip
                } else {
                    SpanAction::Keep
                }
            })
        } else {
            text.to_string()
        };

        if !self.suppress_duplicates {
            return filtered;
        }

        let mut seen = HashSet::new();
        rewrite_spans(&filtered, |span| {
            if seen.insert(span.keyword()) {
                SpanAction::Keep
            } else {
                SpanAction::Strip
            }
        })
    }

    fn is_filtered(&self, span: &MarkupSpan) -> bool {
        (self.filter_names && is_name_or_year(&span.target))
            || (self.filter_references && is_reference(&span.target))
    }
}

/// Capitalized multi-word phrase or a bare four-digit number
pub fn is_name_or_year(target: &str) -> bool {
    let target = target.trim();
    YEAR.is_match(target) || PROPER_NAME.is_match(target)
}

/// Citation key or URL
pub fn is_reference(target: &str) -> bool {
    REFERENCE.is_match(target.trim())
}
