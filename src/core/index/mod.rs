//! Keyword and backlink indexing of annotated documents.
//!
//! After a document is annotated, every `[[...]]` span it contains
//! feeds two artifacts:
//!
//! - `{title}_keyword_list.txt` in the output directory: the
//!   document's distinct normalized keywords, one per line, rewritten
//!   each time that document is processed.
//! - one backlink file per keyword in the backlinks directory: a
//!   `# keyword` header followed by one `[[title]]` line per reference,
//!   appended to across runs.
//!
//! The directories and flags live in an explicit [`IndexContext`]
//! built per pipeline run.

pub mod backlinks;
pub mod keywords;
pub mod reconcile;

use std::path::PathBuf;

use crate::core::config::OutputConfig;
use crate::core::error::Result;
use crate::core::markup::extract_spans;

pub use backlinks::{backlink_path, record_backlink, sanitize_file_stem, BacklinkWrite};
pub use keywords::{collect_keywords, write_keyword_list, KeywordCount, KEYWORD_LIST_FILE};
pub use reconcile::{reconcile, reconcile_files, ReconcileReport};

/// Where and how one run writes its index artifacts
#[derive(Debug, Clone)]
pub struct IndexContext {
    pub output_dir: PathBuf,
    pub backlinks_dir: PathBuf,

    /// Skip a reference line when the file already lists the title
    pub dedupe_backlinks: bool,

    /// Shortest keyword (in chars) kept in the keyword list
    pub min_keyword_len: usize,

    /// Stop words in addition to the built-in list
    pub stop_words: Vec<String>,
}

impl IndexContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            backlinks_dir: output_dir.join("backlinks"),
            output_dir,
            dedupe_backlinks: false,
            min_keyword_len: 3,
            stop_words: Vec::new(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            backlinks_dir: config.resolved_backlinks_dir(),
            dedupe_backlinks: config.dedupe_backlinks,
            min_keyword_len: config.min_keyword_len,
            stop_words: config.stop_words.clone(),
        }
    }

    /// Keyword list of the document titled `source_title`
    pub fn keyword_list_path(&self, source_title: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{KEYWORD_LIST_FILE}",
            sanitize_file_stem(source_title)
        ))
    }
}

/// What one indexing pass wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOutcome {
    /// Keywords written to the keyword list, first-seen order, with counts
    pub keywords: Vec<KeywordCount>,

    /// Reference lines appended across backlink files
    pub backlink_refs: usize,

    /// Backlink files created by this pass
    pub files_created: usize,
}

/// Index the spans of `text` as references from `source_title`.
///
/// Any write failure aborts the pass with `IndexWriteFailed`; files
/// already written stay as they are.
pub fn index(text: &str, ctx: &IndexContext, source_title: &str) -> Result<IndexOutcome> {
    let spans = extract_spans(text);

    let keywords = collect_keywords(&spans, ctx);
    write_keyword_list(&ctx.keyword_list_path(source_title), &keywords)?;

    let mut outcome = IndexOutcome {
        keywords,
        ..Default::default()
    };

    for span in &spans {
        match record_backlink(ctx, &span.keyword(), source_title)? {
            BacklinkWrite::Created => {
                outcome.files_created += 1;
                outcome.backlink_refs += 1;
            }
            BacklinkWrite::Appended | BacklinkWrite::HeaderRepaired => {
                outcome.backlink_refs += 1;
            }
            BacklinkWrite::AlreadyListed => {}
        }
    }

    tracing::debug!(
        "Indexed '{}': {} keywords, {} backlink references",
        source_title,
        outcome.keywords.len(),
        outcome.backlink_refs
    );

    Ok(outcome)
}
