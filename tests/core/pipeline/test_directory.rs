// Directory runs

use crate::common::{create_test_services, read_backlink, TestVault};
use std::fs;

#[tokio::test]
async fn test_directory_processes_every_note() {
    let vault = TestVault::with_notes(&[
        ("alpha.md", "About [[graphs]]."),
        ("nested/beta.md", "More [[graph]] talk."),
        ("image.png", "not markdown"),
        (".obsidian/app.md", "[[hidden]]"),
    ]);
    let services = create_test_services(&vault.output);

    let batch = services
        .create_pipeline()
        .process_directory(&vault.notes)
        .await
        .unwrap();

    assert_eq!(batch.documents_processed, 2);
    assert_eq!(batch.documents_failed, 0);
    assert!(vault.output_file("alpha.md").exists());
    assert!(vault.output_file("beta.md").exists());
    assert_eq!(
        read_backlink(&vault.backlinks(), "graph"),
        "# graph\n\n[[alpha]]\n[[beta]]\n"
    );
    assert!(!vault.backlinks().join("hidden.md").exists());

    // Each document keeps its own keyword list
    assert_eq!(
        fs::read_to_string(vault.output.join("alpha_keyword_list.txt")).unwrap(),
        "graph\n"
    );
    assert_eq!(
        fs::read_to_string(vault.output.join("beta_keyword_list.txt")).unwrap(),
        "graph\n"
    );
}

#[tokio::test]
async fn test_batch_keeps_every_keyword_list() {
    let vault = TestVault::with_notes(&[
        ("alpha.md", "On [[graphs]]."),
        ("beta.md", "On [[lattice]]."),
    ]);
    let services = create_test_services(&vault.output);

    let batch = services
        .create_pipeline()
        .process_directory(&vault.notes)
        .await
        .unwrap();

    assert_eq!(batch.documents_processed, 2);
    assert_eq!(
        fs::read_to_string(vault.output.join("alpha_keyword_list.txt")).unwrap(),
        "graph\n"
    );
    assert_eq!(
        fs::read_to_string(vault.output.join("beta_keyword_list.txt")).unwrap(),
        "lattice\n"
    );
}

#[tokio::test]
async fn test_unreadable_note_is_counted_not_fatal() {
    let vault = TestVault::with_notes(&[("good.md", "fine")]);
    fs::write(vault.notes.join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    let services = create_test_services(&vault.output);

    let batch = services
        .create_pipeline()
        .process_directory(&vault.notes)
        .await
        .unwrap();

    assert_eq!(batch.documents_processed, 1);
    assert_eq!(batch.documents_failed, 1);
    assert_eq!(batch.reports[0].title, "good");
}

#[tokio::test]
async fn test_output_inside_input_is_skipped() {
    let vault = TestVault::with_notes(&[("note.md", "[[rust]]")]);
    let output = vault.notes.join("annotated");
    let services = create_test_services(&output);
    let pipeline = services.create_pipeline();

    pipeline.process_directory(&vault.notes).await.unwrap();
    let second = pipeline.process_directory(&vault.notes).await.unwrap();

    // The annotated copy is not picked up as input
    assert_eq!(second.documents_processed, 1);
}

#[tokio::test]
async fn test_missing_directory_is_an_error() {
    let vault = TestVault::new();
    let services = create_test_services(&vault.output);

    let result = services
        .create_pipeline()
        .process_directory(&vault.root().join("absent"))
        .await;

    assert!(result.is_err());
}
