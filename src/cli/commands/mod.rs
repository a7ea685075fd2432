//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod backends;
pub mod completions;
pub mod config;
pub mod process;
pub mod reconcile;

// Re-export argument types for use in mod.rs
pub use backends::BackendsArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use process::ProcessArgs;
pub use reconcile::ReconcileArgs;
