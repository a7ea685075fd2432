//! linkweave - wikilink annotation for markdown notes
//!
//! Sends markdown documents through an annotation backend that wraps
//! concepts in `[[...]]` markup, cleans the result with a small rule
//! engine and maintains a keyword list plus per-keyword backlink files
//! next to the annotated output.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - markup (span scanning, keyword normalization)
//!   - backend (annotation backends, registry)
//!   - processing (chunking, deadlines, orchestration, pipeline)
//!   - rules (name, reference and duplicate filtering)
//!   - index (keyword list, backlinks, duplicate reconciliation)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Paragraph-respecting chunking, never splitting a paragraph
//! - Per-chunk fallback: a failed backend call keeps the original text
//! - Deadlines per backend call and per document
//! - Append-only backlink files with an optional dedupe mode

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{LinkweaveError, Result};
pub use core::processing::DocumentPipeline;
pub use core::services::Services;
pub use core::types::*;
