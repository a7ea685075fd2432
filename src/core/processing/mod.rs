//! Document processing.
//!
//! Turns raw markdown into annotated markdown:
//!
//! - Paragraph-respecting chunking within a token bound
//! - Deadline guards for backend calls and whole documents
//! - Sequential chunk annotation with per-chunk fallback
//! - Input discovery for directory runs
//! - End-to-end pipeline orchestration

pub mod chunker;
pub mod orchestrator;
pub mod pipeline;
pub mod timeout;
pub mod walker;

pub use chunker::Chunker;
pub use orchestrator::{ChunkOrchestrator, Merged, CHUNK_SEPARATOR};
pub use pipeline::DocumentPipeline;
pub use timeout::{with_timeout, TimeoutError, TimeoutGuard};
pub use walker::FileWalker;
