//! Tests for the reconcile command

use crate::common::create_test_services;
use linkweave::cli::commands::reconcile::{execute, ReconcileArgs};
use linkweave::cli::OutputFormat;
use std::fs;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_reconcile_explicit_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("topic.md"), "keep").unwrap();
    sleep(Duration::from_millis(1100));
    fs::write(dir.path().join("Topic (2).md"), "drop").unwrap();
    let services = Arc::new(create_test_services(&dir.path().join("unused")));

    execute(
        ReconcileArgs {
            dir: Some(dir.path().to_path_buf()),
        },
        &services,
        OutputFormat::Json,
    )
    .await
    .unwrap();

    assert!(dir.path().join("topic.md").exists());
    assert!(!dir.path().join("Topic (2).md").exists());
}

#[tokio::test]
async fn test_reconcile_defaults_to_output_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("solo.md"), "only").unwrap();
    let services = Arc::new(create_test_services(dir.path()));

    execute(ReconcileArgs { dir: None }, &services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(dir.path().join("solo.md").exists());
}

#[tokio::test]
async fn test_reconcile_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let services = Arc::new(create_test_services(&dir.path().join("missing")));

    let result = execute(ReconcileArgs { dir: None }, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}
