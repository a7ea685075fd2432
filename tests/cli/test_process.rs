//! Tests for the process command

use crate::common::{create_test_services, test_config, TestVault};
use linkweave::cli::commands::process::{execute, ProcessArgs};
use linkweave::cli::OutputFormat;
use linkweave::core::services::Services;
use std::fs;
use std::sync::Arc;

fn args(path: std::path::PathBuf) -> ProcessArgs {
    ProcessArgs {
        path,
        quiet: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_process_single_file() {
    let vault = TestVault::with_notes(&[("rust.md", "Learning [[ownership]].")]);
    let services = Arc::new(create_test_services(&vault.output));

    execute(args(vault.notes.join("rust.md")), &services, OutputFormat::Json)
        .await
        .expect("process should succeed");

    assert_eq!(
        fs::read_to_string(vault.output_file("rust.md")).unwrap(),
        "Learning [[ownership]]."
    );
}

#[tokio::test]
async fn test_process_with_title_override() {
    let vault = TestVault::with_notes(&[("draft-01.md", "About [[lifetime]].")]);
    let services = Arc::new(create_test_services(&vault.output));

    let mut process_args = args(vault.notes.join("draft-01.md"));
    process_args.title = Some("Lifetimes".to_string());
    execute(process_args, &services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(vault.output_file("Lifetimes.md").exists());
    assert!(!vault.output_file("draft-01.md").exists());
    let backlink = fs::read_to_string(vault.backlinks().join("lifetime.md")).unwrap();
    assert!(backlink.contains("[[Lifetimes]]"));
}

#[tokio::test]
async fn test_process_directory() {
    let vault = TestVault::with_notes(&[("a.md", "[[one]]"), ("b.md", "[[two]]")]);
    let services = Arc::new(create_test_services(&vault.output));

    execute(args(vault.notes.clone()), &services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(vault.output_file("a.md").exists());
    assert!(vault.output_file("b.md").exists());
}

#[tokio::test]
async fn test_process_missing_path_fails() {
    let vault = TestVault::new();
    let services = Arc::new(create_test_services(&vault.output));

    let err = execute(args(vault.notes.join("nope.md")), &services, OutputFormat::Human)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid path"));
}

#[tokio::test]
async fn test_process_with_glossary_backend() {
    let vault = TestVault::with_notes(&[("db.md", "Postgres uses MVCC.")]);
    let mut config = test_config(&vault.output);
    config.backend.provider = "glossary".to_string();
    config.backend.glossary = vec!["MVCC".to_string()];
    let services = Arc::new(Services::new(config).unwrap());

    execute(args(vault.notes.join("db.md")), &services, OutputFormat::Json)
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(vault.output_file("db.md")).unwrap(),
        "Postgres uses [[MVCC]]."
    );
}
