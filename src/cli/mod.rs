//! CLI adapter for linkweave
//!
//! Thin clap layer over `core/`: argument parsing, config overrides and
//! output formatting. All processing goes through [`Services`].
//!
//! [`Services`]: crate::core::services::Services

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// linkweave - wikilink annotation for markdown notes
///
/// Wraps concepts in [[wikilinks]] through a pluggable annotation
/// backend, then maintains a keyword list and per-keyword backlink
/// files next to the annotated output.
#[derive(Parser, Debug)]
#[command(name = "linkweave")]
#[command(version)]
#[command(about = "Wikilink annotation for markdown notes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Config file (overrides LINKWEAVE_CONFIG and the XDG location)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate a markdown file or every markdown file under a directory
    Process(commands::ProcessArgs),

    /// Remove duplicate output files, keeping the earliest created
    Reconcile(commands::ReconcileArgs),

    /// List available annotation backends
    #[command(name = "list-backends")]
    ListBackends(commands::BackendsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  linkweave completions bash > ~/.local/share/bash-completion/completions/linkweave
    ///   zsh:   linkweave completions zsh > ~/.zfunc/_linkweave
    ///   fish:  linkweave completions fish > ~/.config/fish/completions/linkweave.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Commands that don't need services
    match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        Commands::ListBackends(args) => return commands::backends::execute(args, cli.format),
        _ => {}
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.merge_env();
            config
        }
        None => Config::load_with_xdg(&xdg)?,
    };

    // Command-line flags win over env and file
    if let Commands::Process(args) = &cli.command {
        args.apply_overrides(&mut config)?;
    }
    config.validate()?;
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::Process(args) => commands::process::execute(args, &services, cli.format).await,
        Commands::Reconcile(args) => {
            commands::reconcile::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::ListBackends(_) | Commands::Completions(_) => unreachable!(), // Handled above
    }
}
