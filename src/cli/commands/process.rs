//! Process command - annotate a file or a directory of markdown files

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::config::{Config, Intensity};
use crate::core::error::Result as CoreResult;
use crate::core::services::Services;
use crate::core::types::{BatchReport, Document, ProcessReport};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the process command
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Markdown file or directory to process
    pub path: PathBuf,

    /// Output directory for annotated files, keyword list and backlinks
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Annotation backend (see list-backends)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Processing intensity: light, standard or thorough
    #[arg(long)]
    pub intensity: Option<String>,

    /// Title for a single file (defaults to the file stem)
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Token bound per chunk
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Skip duplicate file reconciliation
    #[arg(long)]
    pub no_reconcile: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl ProcessArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) -> CoreResult<()> {
        if let Some(output) = &self.output {
            config.output.output_dir = output.clone();
        }
        if let Some(backend) = &self.backend {
            config.backend.provider = backend.clone();
        }
        if let Some(intensity) = &self.intensity {
            config.backend.intensity = intensity.parse::<Intensity>()?;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.chunking.max_tokens = max_tokens;
        }
        if self.no_reconcile {
            config.output.reconcile = false;
        }
        Ok(())
    }
}

/// Processing result response
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub backend: String,
    pub output_dir: String,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub duration_secs: f64,
    pub reports: Vec<ProcessReport>,
}

/// Execute the process command
pub async fn execute(
    args: ProcessArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    let pipeline = services.create_pipeline();
    let show_progress = !args.quiet && format == OutputFormat::Human;

    if show_progress {
        eprintln!(
            "Processing {} with backend '{}'...",
            colors::file_path(&path.display().to_string()),
            pipeline.backend_name()
        );
    }

    let batch = if path.is_dir() {
        if args.title.is_some() {
            crate::cli::output::print_warning("--title is ignored when processing a directory");
        }
        pipeline.process_directory(&path).await?
    } else {
        let mut doc = Document::from_file(&path)?;
        if let Some(title) = args.title {
            doc.title = title;
        }
        let report = pipeline.process_document(&doc).await?;
        BatchReport {
            documents_processed: 1,
            documents_failed: 0,
            duration_ms: report.duration_ms,
            reports: vec![report],
        }
    };

    let response = ProcessResponse {
        backend: pipeline.backend_name().to_string(),
        output_dir: services.config.output.output_dir.display().to_string(),
        documents_processed: batch.documents_processed,
        documents_failed: batch.documents_failed,
        duration_secs: batch.duration_ms as f64 / 1000.0,
        reports: batch.reports,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

fn print_human(response: &ProcessResponse) {
    for report in &response.reports {
        let fallbacks = if report.fallbacks > 0 {
            format!(
                ", {} fallback",
                colors::warning(&report.fallbacks.to_string())
            )
        } else {
            String::new()
        };
        println!(
            "  {} {} ({} chunks{}, {} keywords, {} backlinks)",
            colors::success("+"),
            colors::file_path(&report.output_path.display().to_string()),
            colors::number(&report.chunks.to_string()),
            fallbacks,
            colors::number(&report.keywords.to_string()),
            colors::number(&report.backlink_refs.to_string())
        );
    }

    println!(
        "{} {} documents in {}",
        colors::success("Processed"),
        colors::number(&response.documents_processed.to_string()),
        colors::number(&format_duration(response.duration_secs))
    );
    if response.documents_failed > 0 {
        println!(
            "{} {} documents (see log)",
            colors::error("Failed"),
            colors::number(&response.documents_failed.to_string())
        );
    }
}
