//! List-backends command - show the backend registry

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::backend::REGISTRY;
use clap::Args;
use serde::Serialize;

/// Arguments for the list-backends command
#[derive(Args, Debug)]
pub struct BackendsArgs {}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BackendInfo {
    pub id: &'static str,
    pub description: &'static str,
}

/// Registry contents in registry order
pub fn backend_list() -> Vec<BackendInfo> {
    REGISTRY
        .iter()
        .map(|entry| BackendInfo {
            id: entry.id,
            description: entry.description,
        })
        .collect()
}

/// Execute the list-backends command
pub fn execute(_args: BackendsArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let backends = backend_list();

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Backends:"));
            for backend in &backends {
                println!(
                    "  {:<12} {}",
                    colors::backend(backend.id),
                    colors::dim(backend.description)
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&backends)?);
        }
    }

    Ok(())
}
