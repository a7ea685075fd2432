//! Unified service container for linkweave
//!
//! Provides shared access to the configuration and the configured
//! annotation backend.

use crate::core::backend::{create_backend, AnnotationBackend};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::processing::DocumentPipeline;
use std::sync::Arc;

/// Unified services container
///
/// The CLI commands use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Backend selected by `backend.provider`
    pub backend: Arc<dyn AnnotationBackend>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Fails when the configured backend cannot be built (unknown
    /// provider, missing model or API key).
    pub fn new(config: Config) -> Result<Self> {
        let backend = create_backend(&config)?;
        Ok(Self {
            config: Arc::new(config),
            backend,
        })
    }

    /// Create a pipeline sharing this container's config and backend
    pub fn create_pipeline(&self) -> DocumentPipeline {
        DocumentPipeline::new(Arc::clone(&self.config), Arc::clone(&self.backend))
    }
}
