//! Paragraph-respecting text chunking.
//!
//! Splits a document into contiguous slices on blank-line boundaries,
//! packing whole paragraphs into each chunk while the running
//! whitespace-token count stays within the bound. A paragraph is
//! never split: one that alone exceeds the bound becomes its own
//! oversized chunk.
//!
//! Separators inside a chunk are kept verbatim. Separators between
//! chunks are dropped; the orchestrator re-joins chunks with a blank
//! line.
//!
//! # Example
//!
//! ```
//! use linkweave::core::processing::Chunker;
//!
//! let chunker = Chunker::new(4);
//! let chunks = chunker.split("one two\n\nthree four\n\nfive six");
//!
//! assert_eq!(chunks, vec!["one two\n\nthree four", "five six"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{LinkweaveError, Result};
use crate::core::types::{count_tokens, Chunk};

// One or more blank lines; a blank line may hold spaces or tabs
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n(?:[ \t]*\r?\n)*").unwrap());

/// Byte range of one non-blank paragraph
#[derive(Debug, Clone, Copy)]
struct Paragraph {
    start: usize,
    end: usize,
    tokens: usize,
}

/// Paragraph-respecting chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Whitespace-delimited tokens per chunk
    max_tokens: usize,
}

impl Chunker {
    /// Create a chunker with the given token bound.
    ///
    /// A zero bound is accepted here and reported as a chunking
    /// failure by [`Chunker::try_chunk`].
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// Get the token bound.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Chunk text, reporting invalid settings as `ChunkingFailed`.
    ///
    /// Whitespace-only input yields no chunks.
    pub fn try_chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        if self.max_tokens == 0 {
            return Err(LinkweaveError::ChunkingFailed(
                "token bound must be non-zero".to_string(),
            ));
        }

        let mut chunks = Vec::new();
        let mut current: Option<Paragraph> = None;

        for para in paragraphs(text) {
            current = match current {
                Some(cur) if cur.tokens + para.tokens > self.max_tokens => {
                    chunks.push(make_chunk(text, cur, chunks.len()));
                    Some(para)
                }
                Some(cur) => Some(Paragraph {
                    start: cur.start,
                    end: para.end,
                    tokens: cur.tokens + para.tokens,
                }),
                None => Some(para),
            };
        }

        if let Some(cur) = current {
            chunks.push(make_chunk(text, cur, chunks.len()));
        }

        Ok(chunks)
    }

    /// Chunk text, falling back to a single whole-text chunk on failure.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        match self.try_chunk(text) {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!("{}; processing document as a single chunk", e);
                vec![Chunk::whole(text)]
            }
        }
    }

    /// Chunk text and return only the chunk strings.
    pub fn split(&self, text: &str) -> Vec<String> {
        self.chunk(text).into_iter().map(|c| c.text).collect()
    }
}

/// Non-blank paragraphs of `text`, in order
fn paragraphs(text: &str) -> Vec<Paragraph> {
    let mut out = Vec::new();
    let mut cursor = 0;

    let mut push = |start: usize, end: usize| {
        let tokens = count_tokens(&text[start..end]);
        if tokens > 0 {
            out.push(Paragraph { start, end, tokens });
        }
    };

    for sep in PARAGRAPH_BREAK.find_iter(text) {
        push(cursor, sep.start());
        cursor = sep.end();
    }
    push(cursor, text.len());

    out
}

fn make_chunk(text: &str, para: Paragraph, index: usize) -> Chunk {
    Chunk {
        text: text[para.start..para.end].to_string(),
        start_offset: para.start,
        end_offset: para.end,
        chunk_index: index,
        token_count: para.tokens,
    }
}
