//! Tests for the list-backends command

use linkweave::cli::commands::backends::{backend_list, execute, BackendsArgs};
use linkweave::cli::OutputFormat;
use linkweave::core::backend::BackendKind;

#[test]
fn test_backend_list_matches_registry() {
    let ids: Vec<&str> = backend_list().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["passthrough", "glossary", "openai"]);

    for id in ids {
        assert!(id.parse::<BackendKind>().is_ok());
    }
}

#[test]
fn test_execute_both_formats() {
    execute(BackendsArgs {}, OutputFormat::Human).unwrap();
    execute(BackendsArgs {}, OutputFormat::Json).unwrap();
}
