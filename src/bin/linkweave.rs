//! linkweave CLI - annotate markdown notes with wikilinks
//!
//! # Examples
//!
//! ```bash
//! # Annotate one note with the offline glossary backend
//! linkweave process notes/graphs.md --backend glossary
//!
//! # Annotate a whole vault into a separate output directory
//! linkweave process ~/vault --output ~/vault-annotated
//!
//! # Remove duplicate output files
//! linkweave reconcile ~/vault-annotated
//!
//! # Show configuration
//! linkweave show-config
//! ```

use clap::Parser;
use linkweave::cli::output::print_error;
use linkweave::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr; stdout carries command output.
/// `LINKWEAVE_LOG_FORMAT=json` switches to structured JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "linkweave=info".into());
    let json = std::env::var("LINKWEAVE_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
