//! Annotation backends.
//!
//! An annotation backend takes a slice of markdown and returns the same
//! text with concepts wrapped in `[[...]]` markup. Backends are a closed
//! set of [`BackendKind`] variants; [`REGISTRY`] maps each identifier to
//! its constructor, so adding a backend means adding a variant and one
//! registry entry.
//!
//! # Error contract
//!
//! Backends report deadline expiry as
//! [`LinkweaveError::BackendTimeout`] and every other failure as
//! [`LinkweaveError::BackendFailed`] or
//! [`LinkweaveError::MalformedResponse`]. The orchestrator falls back to
//! the original text in all three cases and only logs them differently.

mod glossary;
mod openai;
mod passthrough;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::{LinkweaveError, Result};

pub use glossary::GlossaryBackend;
pub use openai::OpenAiBackend;
pub use passthrough::PassthroughBackend;

/// Marks up concepts in a piece of markdown.
#[async_trait]
pub trait AnnotationBackend: Send + Sync {
    /// Identifier used in logs and errors
    fn name(&self) -> &str;

    /// Return `text` with concepts wrapped in `[[...]]`.
    ///
    /// Implementations must not reorder, drop or paraphrase content;
    /// the orchestrator trusts the output as the annotated chunk.
    async fn annotate(&self, text: &str) -> Result<String>;
}

/// The available backend variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Returns text unchanged
    Passthrough,

    /// Links configured glossary terms, offline and deterministic
    Glossary,

    /// OpenAI-compatible chat completions endpoint
    OpenAi,
}

/// Builds a backend from the full configuration
pub type BackendFactory = fn(&Config) -> Result<Arc<dyn AnnotationBackend>>;

/// One registry row: identifier, variant, constructor
pub struct BackendEntry {
    pub id: &'static str,
    pub kind: BackendKind,
    pub description: &'static str,
    pub factory: BackendFactory,
}

/// Identifier -> constructor table for every backend variant
pub static REGISTRY: &[BackendEntry] = &[
    BackendEntry {
        id: "passthrough",
        kind: BackendKind::Passthrough,
        description: "Return text unchanged (keeps pre-existing links only)",
        factory: build_passthrough,
    },
    BackendEntry {
        id: "glossary",
        kind: BackendKind::Glossary,
        description: "Link the first mention of each configured glossary term",
        factory: build_glossary,
    },
    BackendEntry {
        id: "openai",
        kind: BackendKind::OpenAi,
        description: "OpenAI-compatible chat completions API",
        factory: build_openai,
    },
];

fn build_passthrough(_config: &Config) -> Result<Arc<dyn AnnotationBackend>> {
    Ok(Arc::new(PassthroughBackend))
}

fn build_glossary(config: &Config) -> Result<Arc<dyn AnnotationBackend>> {
    Ok(Arc::new(GlossaryBackend::new(&config.backend.glossary)?))
}

fn build_openai(config: &Config) -> Result<Arc<dyn AnnotationBackend>> {
    Ok(Arc::new(OpenAiBackend::new(config)?))
}

impl BackendKind {
    fn entry(self) -> &'static BackendEntry {
        REGISTRY
            .iter()
            .find(|entry| entry.kind == self)
            .expect("every BackendKind has a registry entry")
    }

    pub fn id(self) -> &'static str {
        self.entry().id
    }

    pub fn description(self) -> &'static str {
        self.entry().description
    }

    /// Construct a backend of this kind
    pub fn build(self, config: &Config) -> Result<Arc<dyn AnnotationBackend>> {
        (self.entry().factory)(config)
    }

    /// All variants, in registry order
    pub fn all() -> impl Iterator<Item = BackendKind> {
        REGISTRY.iter().map(|entry| entry.kind)
    }
}

impl FromStr for BackendKind {
    type Err = LinkweaveError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        REGISTRY
            .iter()
            .find(|entry| entry.id == wanted)
            .map(|entry| entry.kind)
            .ok_or_else(|| LinkweaveError::UnknownBackend(s.to_string()))
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Build the backend named by `config.backend.provider`
pub fn create_backend(config: &Config) -> Result<Arc<dyn AnnotationBackend>> {
    let kind: BackendKind = config.backend.provider.parse()?;
    let backend = kind.build(config)?;
    tracing::debug!("Using annotation backend '{}'", backend.name());
    Ok(backend)
}
