//! Sequential chunk annotation with per-chunk fallback.

use std::time::Duration;

use crate::core::backend::AnnotationBackend;
use crate::core::error::LinkweaveError;
use crate::core::types::{AnnotationResult, Chunk};

use super::timeout::TimeoutGuard;

/// Separator re-inserted between merged chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Merged output of one orchestrator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// Chunk results joined by [`CHUNK_SEPARATOR`]
    pub text: String,

    /// One result per input chunk, in input order
    pub results: Vec<AnnotationResult>,

    /// Number of `Fallback` results
    pub fallbacks: usize,
}

/// Drives a backend over a document's chunks.
///
/// Chunks are annotated one at a time and in order; a chunk whose
/// backend call fails, times out or comes back empty keeps its original
/// text. None of those failures reach the caller.
#[derive(Debug, Clone)]
pub struct ChunkOrchestrator {
    chunk_timeout: Duration,
}

impl ChunkOrchestrator {
    pub fn new(chunk_timeout: Duration) -> Self {
        Self { chunk_timeout }
    }

    pub fn chunk_timeout(&self) -> Duration {
        self.chunk_timeout
    }

    pub async fn process(&self, chunks: &[Chunk], backend: &dyn AnnotationBackend) -> Merged {
        let mut results = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let result = self.annotate_chunk(chunk, backend).await;
            results.push(result);
        }

        let fallbacks = results.iter().filter(|r| r.is_fallback()).count();
        let text = results
            .iter()
            .map(AnnotationResult::text)
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        Merged {
            text,
            results,
            fallbacks,
        }
    }

    async fn annotate_chunk(
        &self,
        chunk: &Chunk,
        backend: &dyn AnnotationBackend,
    ) -> AnnotationResult {
        let index = chunk.chunk_index;
        let guarded = TimeoutGuard::new(self.chunk_timeout)
            .run(backend.annotate(&chunk.text))
            .await;

        let outcome = match guarded {
            Ok(inner) => inner,
            Err(elapsed) => Err(LinkweaveError::BackendTimeout {
                backend: backend.name().to_string(),
                duration_ms: elapsed.duration_ms(),
            }),
        };

        match outcome {
            Ok(output) if !output.trim().is_empty() => {
                tracing::debug!(
                    "Chunk {} annotated ({} -> {} bytes)",
                    index,
                    chunk.text.len(),
                    output.len()
                );
                AnnotationResult::Annotated(output)
            }
            Ok(_) => {
                tracing::warn!("Chunk {}: backend returned empty output, keeping original", index);
                AnnotationResult::Fallback(chunk.text.clone())
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("Chunk {} timed out, keeping original: {}", index, e);
                AnnotationResult::Fallback(chunk.text.clone())
            }
            Err(e) if e.is_chunk_recoverable() => {
                tracing::warn!("Chunk {} failed, keeping original: {}", index, e);
                AnnotationResult::Fallback(chunk.text.clone())
            }
            // Not a backend fault (local IO, bad config); still contained to the chunk
            Err(e) => {
                tracing::error!(
                    "Chunk {}: unexpected error from backend '{}', keeping original: {}",
                    index,
                    backend.name(),
                    e
                );
                AnnotationResult::Fallback(chunk.text.clone())
            }
        }
    }
}
