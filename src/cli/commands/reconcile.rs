//! Reconcile command - delete duplicate output files

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::index::{reconcile, ReconcileReport};
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the reconcile command
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Directory to reconcile (defaults to the configured output directory)
    pub dir: Option<PathBuf>,
}

/// Execute the reconcile command
pub async fn execute(
    args: ReconcileArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = args
        .dir
        .unwrap_or_else(|| services.config.output.output_dir.clone());

    let report: ReconcileReport = reconcile(&dir)?;

    match format {
        OutputFormat::Human => {
            for path in &report.removed {
                println!(
                    "  {} {}",
                    colors::warning("-"),
                    colors::file_path(&path.display().to_string())
                );
            }
            println!(
                "{} {} duplicate files in {} groups",
                colors::success("Removed"),
                colors::number(&report.removed.len().to_string()),
                colors::number(&report.groups.to_string())
            );
            if report.failed > 0 {
                println!(
                    "{} {} files could not be removed (see log)",
                    colors::error("Failed:"),
                    colors::number(&report.failed.to_string())
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
