// Single-document runs

use crate::common::{create_test_services, read_backlink, test_config, FailOnMarker};
use linkweave::core::processing::DocumentPipeline;
use linkweave::core::services::Services;
use linkweave::core::types::Document;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_duplicate_forms_leave_one_span() {
    let dir = TempDir::new().unwrap();
    let services = create_test_services(dir.path());
    let doc = Document::new("Pets", "[[Cat]] sat. [[Cat]] ran. [[Cats]] slept.");

    let report = services.create_pipeline().process_document(&doc).await.unwrap();

    let output = fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(output, "[[Cat]] sat. Cat ran. Cats slept.");
    assert_eq!(output.matches("[[").count(), 1);
    assert_eq!(read_backlink(&dir.path().join("backlinks"), "cat"), "# cat\n\n[[Pets]]\n");
}

#[tokio::test]
async fn test_glossary_backend_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.backend.provider = "glossary".to_string();
    config.backend.glossary = vec!["ownership".to_string(), "borrow checker".to_string()];
    let services = Services::new(config).unwrap();

    let doc = Document::new(
        "Rust Notes",
        "Ownership rules are enforced by the borrow checker.\n\nOwnership again.",
    );
    let report = services.create_pipeline().process_document(&doc).await.unwrap();

    assert_eq!(report.output_path, dir.path().join("Rust Notes.md"));
    assert_eq!(
        fs::read_to_string(&report.output_path).unwrap(),
        "[[Ownership]] rules are enforced by the [[borrow checker]].\n\nOwnership again."
    );
    assert_eq!(report.keywords, 2);
    assert_eq!(report.backlink_refs, 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("Rust Notes_keyword_list.txt")).unwrap(),
        "ownership\nborrow checker\n"
    );
}

#[tokio::test]
async fn test_failed_chunk_still_produces_output() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.chunking.max_tokens = 2;
    let pipeline = DocumentPipeline::new(Arc::new(config), Arc::new(FailOnMarker("beta")));

    let doc = Document::new("Mixed", "alpha one\n\nbeta two\n\ngamma three");
    let report = pipeline.process_document(&doc).await.unwrap();

    assert_eq!(report.chunks, 3);
    assert_eq!(report.fallbacks, 1);
    assert_eq!(
        fs::read_to_string(&report.output_path).unwrap(),
        "ALPHA ONE\n\nbeta two\n\nGAMMA THREE"
    );
}

#[tokio::test]
async fn test_rules_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.rules.filter_names = false;
    config.rules.suppress_duplicates = false;
    let services = Services::new(config).unwrap();

    let text = "[[Ada Lovelace]] and [[Ada Lovelace]]";
    let report = services
        .create_pipeline()
        .process_document(&Document::new("Ada", text))
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&report.output_path).unwrap(), text);
    assert_eq!(report.backlink_refs, 2);
}

#[tokio::test]
async fn test_reconcile_after_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("journal.md"), "older copy").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let services = create_test_services(dir.path());
    let report = services
        .create_pipeline()
        .process_document(&Document::new("Journal", "new text"))
        .await
        .unwrap();

    // The earlier file wins its collision group
    assert_eq!(report.duplicates_removed, 1);
    assert!(dir.path().join("journal.md").exists());
    assert!(!report.output_path.exists());
}

#[tokio::test]
async fn test_title_is_sanitized_for_file_name() {
    let dir = TempDir::new().unwrap();
    let services = create_test_services(dir.path());

    let report = services
        .create_pipeline()
        .process_document(&Document::new("Q3: plans/goals?", "text"))
        .await
        .unwrap();

    assert_eq!(report.output_path, dir.path().join("Q3_ plans_goals_.md"));
    assert!(report.output_path.exists());
}
