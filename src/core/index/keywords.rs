//! Per-document keyword list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::IndexContext;
use crate::core::error::{LinkweaveError, Result};
use crate::core::markup::{normalize_keyword, MarkupSpan};

/// Suffix of each document's keyword list, `{title}_keyword_list.txt`
pub const KEYWORD_LIST_FILE: &str = "keyword_list.txt";

const BUILTIN_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "in", "into", "is", "it", "its", "of", "on", "or", "our", "she", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "to", "was", "we", "were",
    "what", "when", "which", "who", "will", "with", "you", "your",
];

/// A normalized keyword and how often it was marked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Distinct keywords of `spans` in first-seen order, minus stop words
/// and keywords shorter than the context's minimum length
pub fn collect_keywords(spans: &[MarkupSpan], ctx: &IndexContext) -> Vec<KeywordCount> {
    let extra: Vec<String> = ctx.stop_words.iter().map(|w| normalize_keyword(w)).collect();
    let is_stop = |kw: &str| BUILTIN_STOP_WORDS.contains(&kw) || extra.iter().any(|w| w == kw);

    let mut order: Vec<KeywordCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for span in spans {
        let keyword = span.keyword();
        if keyword.chars().count() < ctx.min_keyword_len || is_stop(&keyword) {
            continue;
        }

        match positions.get(&keyword) {
            Some(&pos) => order[pos].count += 1,
            None => {
                positions.insert(keyword.clone(), order.len());
                order.push(KeywordCount { keyword, count: 1 });
            }
        }
    }

    order
}

/// Overwrite the keyword list: one normalized keyword per line
pub fn write_keyword_list(path: &Path, keywords: &[KeywordCount]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LinkweaveError::IndexWriteFailed(format!("{}: {e}", parent.display()))
        })?;
    }

    let contents: String = keywords
        .iter()
        .map(|k| format!("{}\n", k.keyword))
        .collect();

    fs::write(path, contents)
        .map_err(|e| LinkweaveError::IndexWriteFailed(format!("{}: {e}", path.display())))
}
