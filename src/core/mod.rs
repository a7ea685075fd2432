//! Core domain logic (independent of the CLI)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **markup**: `[[...]]` span scanning and keyword normalization
//! - **backend**: Annotation backends and their registry
//! - **processing**: Chunking, deadlines, orchestration, pipeline
//! - **rules**: Post-annotation markup rules
//! - **index**: Keyword list, backlinks, duplicate reconciliation
//! - **services**: Unified service container

pub mod backend;
pub mod config;
pub mod error;
pub mod index;
pub mod markup;
pub mod processing;
pub mod rules;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{LinkweaveError, Result};
pub use services::Services;
