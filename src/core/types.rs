//! Core data types for linkweave.
//!
//! This module defines the data structures that flow through the
//! document pipeline: input documents, chunks, per-chunk annotation
//! outcomes and the reports returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LinkweaveError, Result};

/// Count whitespace-delimited tokens
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// An input document: raw markdown text plus its logical title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Logical title, used for the output file name and backlink references
    pub title: String,

    /// Raw markdown text
    pub text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Load a document from a markdown file; the title is the file stem
    pub fn from_file(path: &Path) -> Result<Self> {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LinkweaveError::InvalidPath(format!("No file name in {path:?}")))?
            .to_string();

        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                LinkweaveError::InvalidPath(format!("Skipping non-UTF-8 file: {path:?}"))
            } else {
                LinkweaveError::IoError(e)
            }
        })?;

        Ok(Self { title, text })
    }

    /// Number of whitespace-delimited tokens in the body
    pub fn token_count(&self) -> usize {
        count_tokens(&self.text)
    }
}

/// A contiguous slice of a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Byte offset where chunk starts in the document
    pub start_offset: usize,

    /// Byte offset where chunk ends in the document
    pub end_offset: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,

    /// Whitespace-delimited token count of `text`
    pub token_count: usize,
}

impl Chunk {
    /// Wrap a whole text as chunk 0
    pub fn whole(text: &str) -> Self {
        Self {
            text: text.to_string(),
            start_offset: 0,
            end_offset: text.len(),
            chunk_index: 0,
            token_count: count_tokens(text),
        }
    }
}

/// Outcome of annotating a single chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum AnnotationResult {
    /// Backend output
    Annotated(String),

    /// Original chunk text, kept because the backend failed or timed out
    Fallback(String),
}

impl AnnotationResult {
    pub fn text(&self) -> &str {
        match self {
            AnnotationResult::Annotated(text) | AnnotationResult::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnnotationResult::Fallback(_))
    }
}

/// Summary of one document run through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Document title
    pub title: String,

    /// Where the annotated document was written
    pub output_path: PathBuf,

    /// Number of chunks sent to the backend
    pub chunks: usize,

    /// Chunks that kept their original text
    pub fallbacks: usize,

    /// Distinct normalized keywords written to the keyword list
    pub keywords: usize,

    /// Reference lines appended across backlink files
    pub backlink_refs: usize,

    /// Duplicate output files deleted by reconciliation
    pub duplicates_removed: usize,

    /// Processing duration in milliseconds
    pub duration_ms: u64,

    /// When the document finished processing
    pub processed_at: DateTime<Utc>,
}

/// Summary of a directory run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Documents that completed the pipeline
    pub documents_processed: usize,

    /// Documents that failed (timeout, index write, unreadable)
    pub documents_failed: usize,

    /// Per-document reports, in processing order
    pub reports: Vec<ProcessReport>,

    /// Total duration in milliseconds
    pub duration_ms: u64,
}
