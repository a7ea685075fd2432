//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub toml: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub backlinks_dir: String,
    pub temperature: f32,
    pub api_key_set: bool,
    pub config: Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let xdg = crate::core::xdg::XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().display().to_string(),
        backlinks_dir: config.output.resolved_backlinks_dir().display().to_string(),
        temperature: config.backend.effective_temperature(),
        api_key_set: std::env::var(&config.backend.api_key_env).is_ok(),
        config: config.clone(),
    };

    if args.toml {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!("  chunking:");
            println!("    enabled: {}", config.chunking.enabled);
            println!("    max_tokens: {}", config.chunking.max_tokens);
            println!("  backend:");
            println!("    provider: {}", colors::backend(&config.backend.provider));
            if let Some(model) = &config.backend.model {
                println!("    model: {model}");
            }
            if let Some(endpoint) = &config.backend.endpoint {
                println!("    endpoint: {endpoint}");
            }
            println!(
                "    api_key: ${} ({})",
                config.backend.api_key_env,
                if response.api_key_set { "set" } else { "unset" }
            );
            println!(
                "    intensity: {} (temperature {:.2})",
                config.backend.intensity, response.temperature
            );
            println!("    glossary terms: {}", config.backend.glossary.len());
            println!("  limits:");
            println!("    chunk_timeout_sec: {}", config.limits.chunk_timeout_sec);
            println!(
                "    document_timeout_sec: {}",
                config.limits.document_timeout_sec
            );
            println!("  rules:");
            println!("    filter_names: {}", config.rules.filter_names);
            println!("    filter_references: {}", config.rules.filter_references);
            println!(
                "    suppress_duplicates: {}",
                config.rules.suppress_duplicates
            );
            println!("  output:");
            println!(
                "    output_dir: {}",
                colors::file_path(&config.output.output_dir.display().to_string())
            );
            println!("    backlinks_dir: {}", colors::file_path(&response.backlinks_dir));
            println!("    dedupe_backlinks: {}", config.output.dedupe_backlinks);
            println!("    reconcile: {}", config.output.reconcile);
            println!("    include: {:?}", config.output.include_patterns);
            println!("    exclude: {:?}", config.output.exclude_patterns);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
