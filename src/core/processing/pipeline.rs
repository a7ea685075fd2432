//! Document pipeline orchestration.
//!
//! Runs one document end to end under the document deadline:
//! 1. Plan chunks (a small document is a single chunk)
//! 2. Annotate chunks through the orchestrator
//! 3. Apply markup rules
//! 4. Write `{output_dir}/{title}.md`
//! 5. Index keywords and backlinks
//! 6. Reconcile duplicate output files

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::backend::AnnotationBackend;
use crate::core::config::Config;
use crate::core::error::{LinkweaveError, Result};
use crate::core::index::{self, reconcile, sanitize_file_stem, IndexContext};
use crate::core::rules::RuleEngine;
use crate::core::types::{BatchReport, Chunk, Document, ProcessReport};

use super::{ChunkOrchestrator, Chunker, FileWalker, TimeoutGuard};

/// End-to-end annotation pipeline for documents and directories
pub struct DocumentPipeline {
    config: Arc<Config>,
    backend: Arc<dyn AnnotationBackend>,
    chunker: Chunker,
    orchestrator: ChunkOrchestrator,
    rules: RuleEngine,
}

impl DocumentPipeline {
    pub fn new(config: Arc<Config>, backend: Arc<dyn AnnotationBackend>) -> Self {
        Self {
            chunker: Chunker::new(config.chunking.max_tokens),
            orchestrator: ChunkOrchestrator::new(config.limits.chunk_timeout()),
            rules: RuleEngine::from_config(&config.rules),
            config,
            backend,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Chunks for `text`: one whole-text chunk when chunking is off
    /// or the text is within twice the token bound
    pub fn plan_chunks(&self, text: &str) -> Vec<Chunk> {
        let bound = self.config.chunking.max_tokens;
        let single = Chunk::whole(text);

        if !self.config.chunking.enabled || single.token_count <= bound.saturating_mul(2) {
            return vec![single];
        }
        self.chunker.chunk(text)
    }

    /// Process one document under the document deadline.
    ///
    /// Expiry surfaces as `LinkweaveError::Timeout`. Steps that already
    /// completed (output file, backlinks) are not rolled back.
    pub async fn process_document(&self, doc: &Document) -> Result<ProcessReport> {
        let deadline = self.config.limits.document_timeout();
        let title = doc.title.clone();

        TimeoutGuard::new(deadline)
            .on_timeout(move |d| {
                tracing::error!("Document '{}' exceeded its {:?} deadline", title, d);
            })
            .run(self.run_document(doc))
            .await
            .map_err(|e| LinkweaveError::Timeout {
                scope: format!("document '{}'", doc.title),
                duration_ms: e.duration_ms(),
            })?
    }

    async fn run_document(&self, doc: &Document) -> Result<ProcessReport> {
        let start = Instant::now();
        tracing::info!("Processing '{}' ({} tokens)", doc.title, doc.token_count());

        let chunks = self.plan_chunks(&doc.text);
        let merged = self
            .orchestrator
            .process(&chunks, self.backend.as_ref())
            .await;
        if merged.fallbacks > 0 {
            tracing::warn!(
                "'{}': {}/{} chunks kept their original text",
                doc.title,
                merged.fallbacks,
                chunks.len()
            );
        }

        let annotated = self.rules.apply(&merged.text);
        let output_path = self.write_output(&doc.title, &annotated)?;

        let ctx = IndexContext::from_config(&self.config.output);
        let outcome = index::index(&annotated, &ctx, &doc.title)?;

        let duplicates_removed = if self.config.output.reconcile {
            match reconcile(&ctx.output_dir) {
                Ok(report) => {
                    if report.failed > 0 {
                        tracing::warn!("Reconcile: {} files could not be handled", report.failed);
                    }
                    report.removed.len()
                }
                Err(e) => {
                    tracing::warn!("Reconcile skipped: {}", e);
                    0
                }
            }
        } else {
            0
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Processed '{}': {} chunks, {} fallbacks, {} keywords in {}ms",
            doc.title,
            chunks.len(),
            merged.fallbacks,
            outcome.keywords.len(),
            duration_ms
        );

        Ok(ProcessReport {
            title: doc.title.clone(),
            output_path,
            chunks: chunks.len(),
            fallbacks: merged.fallbacks,
            keywords: outcome.keywords.len(),
            backlink_refs: outcome.backlink_refs,
            duplicates_removed,
            duration_ms,
            processed_at: Utc::now(),
        })
    }

    fn write_output(&self, title: &str, text: &str) -> Result<PathBuf> {
        let dir = &self.config.output.output_dir;
        fs::create_dir_all(dir)?;

        let path = dir.join(format!("{}.md", sanitize_file_stem(title)));
        fs::write(&path, text)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(path)
    }

    /// Read a markdown file and process it; the title is the file stem
    pub async fn process_file(&self, path: &Path) -> Result<ProcessReport> {
        let doc = Document::from_file(path)?;
        self.process_document(&doc).await
    }

    /// Process every matching markdown file under `root`, one at a time.
    ///
    /// Per-document failures are logged and counted; only an invalid
    /// root or invalid patterns fail the whole run.
    pub async fn process_directory(&self, root: &Path) -> Result<BatchReport> {
        let start = Instant::now();
        let output = &self.config.output;

        let walker = FileWalker::new(&output.include_patterns, &output.exclude_patterns)?
            .skip_dir(&output.output_dir)
            .skip_dir(&output.resolved_backlinks_dir());

        tracing::info!("Collecting documents from {:?}", root);
        let files = walker.collect_files(root)?;
        tracing::info!("Found {} documents", files.len());

        let mut batch = BatchReport::default();
        for (idx, path) in files.iter().enumerate() {
            if idx % 50 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} documents", idx, files.len());
            }

            match self.process_file(path).await {
                Ok(report) => {
                    batch.documents_processed += 1;
                    batch.reports.push(report);
                }
                Err(e) => {
                    tracing::warn!("Failed to process {:?}: {}", path, e);
                    batch.documents_failed += 1;
                }
            }
        }

        batch.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Batch complete: {} processed, {} failed in {}ms",
            batch.documents_processed,
            batch.documents_failed,
            batch.duration_ms
        );

        Ok(batch)
    }
}
