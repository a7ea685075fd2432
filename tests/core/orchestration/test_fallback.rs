// Backend failure on one chunk only affects that chunk

use crate::common::{paragraphs, FailOnMarker, Uppercase};
use linkweave::core::processing::{ChunkOrchestrator, Chunker};
use linkweave::core::types::AnnotationResult;
use std::time::Duration;

fn orchestrator() -> ChunkOrchestrator {
    ChunkOrchestrator::new(Duration::from_secs(5))
}

#[tokio::test]
async fn test_failure_on_one_chunk_keeps_its_original_text() {
    let text = paragraphs(4, 3);
    let chunks = Chunker::new(3).chunk(&text);
    assert_eq!(chunks.len(), 4);

    let merged = orchestrator().process(&chunks, &FailOnMarker("P2")).await;

    assert_eq!(merged.fallbacks, 1);
    assert_eq!(
        merged.text,
        "P0 W1 W2\n\nP1 W1 W2\n\nP2 w1 w2\n\nP3 W1 W2"
    );
    assert!(matches!(merged.results[2], AnnotationResult::Fallback(_)));
    assert!(merged
        .results
        .iter()
        .enumerate()
        .all(|(i, r)| r.is_fallback() == (i == 2)));
}

#[tokio::test]
async fn test_every_chunk_failing_reproduces_input_paragraphs() {
    let text = paragraphs(3, 2);
    let chunks = Chunker::new(2).chunk(&text);

    let merged = orchestrator().process(&chunks, &FailOnMarker("P")).await;

    assert_eq!(merged.fallbacks, 3);
    assert_eq!(merged.text, text);
}

#[tokio::test]
async fn test_one_result_per_chunk_in_order() {
    let text = paragraphs(6, 2);
    let chunks = Chunker::new(4).chunk(&text);

    let merged = orchestrator().process(&chunks, &Uppercase).await;

    assert_eq!(merged.results.len(), chunks.len());
    for (chunk, result) in chunks.iter().zip(&merged.results) {
        assert_eq!(result.text(), chunk.text.to_uppercase());
    }
}
