//! Offline glossary backend.
//!
//! Links the first mention of each configured term per chunk. Matching
//! is case-insensitive on word boundaries and prefers the longest term
//! when two overlap ("graph theory" wins over "graph"). Text already
//! inside `[[...]]` is never touched, and a term the chunk already
//! links is not linked again.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

use super::AnnotationBackend;
use crate::core::error::{LinkweaveError, Result};
use crate::core::markup::{extract_spans, normalize_keyword};

#[derive(Debug, Clone)]
pub struct GlossaryBackend {
    pattern: Option<Regex>,
    terms: usize,
}

impl GlossaryBackend {
    /// Build a backend for `terms`; blank entries are ignored.
    pub fn new(terms: &[String]) -> Result<Self> {
        let mut cleaned: Vec<&str> = terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        cleaned.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });
        cleaned.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        if cleaned.is_empty() {
            tracing::warn!("Glossary backend has no terms; chunks pass through unchanged");
            return Ok(Self {
                pattern: None,
                terms: 0,
            });
        }

        let alternation = cleaned
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| LinkweaveError::ConfigError(format!("Invalid glossary: {e}")))?;

        Ok(Self {
            pattern: Some(pattern),
            terms: cleaned.len(),
        })
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.terms
    }
}

#[async_trait]
impl AnnotationBackend for GlossaryBackend {
    fn name(&self) -> &str {
        "glossary"
    }

    async fn annotate(&self, text: &str) -> Result<String> {
        let Some(pattern) = &self.pattern else {
            return Ok(text.to_string());
        };

        let existing = extract_spans(text);
        let mut linked: HashSet<String> = existing.iter().map(|s| s.keyword()).collect();

        let mut out = String::with_capacity(text.len() + 16);
        let mut cursor = 0;

        for m in pattern.find_iter(text) {
            let inside_span = existing
                .iter()
                .any(|s| m.start() < s.end && m.end() > s.start);
            if inside_span {
                continue;
            }
            if !linked.insert(normalize_keyword(m.as_str())) {
                continue;
            }

            out.push_str(&text[cursor..m.start()]);
            out.push_str("[[");
            out.push_str(m.as_str());
            out.push_str("]]");
            cursor = m.end();
        }

        out.push_str(&text[cursor..]);
        Ok(out)
    }
}
