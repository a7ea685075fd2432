//! Error types and error handling for linkweave.
//!
//! This module defines the error types used throughout the
//! pipeline. Chunk-level failures (backend errors and backend
//! timeouts) are absorbed by the orchestrator; everything else
//! surfaces to the caller of the pipeline.

use thiserror::Error;

/// Result type alias for linkweave operations
pub type Result<T> = std::result::Result<T, LinkweaveError>;

/// Main error type for linkweave
#[derive(Error, Debug)]
pub enum LinkweaveError {
    #[error("Chunking failed: {0}")]
    ChunkingFailed(String),

    #[error("Backend '{backend}' failed: {message}")]
    BackendFailed { backend: String, message: String },

    #[error("Backend '{backend}' timed out after {duration_ms}ms")]
    BackendTimeout { backend: String, duration_ms: u64 },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Timed out processing {scope} after {duration_ms}ms")]
    Timeout { scope: String, duration_ms: u64 },

    #[error("Index write failed: {0}")]
    IndexWriteFailed(String),

    #[error("Reconcile failed: {0}")]
    ReconcileFailed(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LinkweaveError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a deadline expiry (backend call or whole document)
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            LinkweaveError::BackendTimeout { .. } | LinkweaveError::Timeout { .. }
        )
    }

    /// Check if a chunk hitting this error should fall back to its
    /// original text instead of failing the document
    pub fn is_chunk_recoverable(&self) -> bool {
        matches!(
            self,
            LinkweaveError::BackendFailed { .. }
                | LinkweaveError::BackendTimeout { .. }
                | LinkweaveError::MalformedResponse(_)
        )
    }

    /// Check if this is a configuration problem (bad input, not a runtime fault)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LinkweaveError::ConfigError(_)
                | LinkweaveError::UnknownBackend(_)
                | LinkweaveError::TomlError(_)
        )
    }
}
