// Backlink files: one header, one line per reference, call order

use crate::common::read_backlink;
use linkweave::core::error::LinkweaveError;
use linkweave::core::index::{index, IndexContext};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_two_titles_reference_one_keyword() {
    let dir = TempDir::new().unwrap();
    let ctx = IndexContext::new(dir.path());

    index("Notes on [[graphs]].", &ctx, "Alpha").unwrap();
    index("More about [[Graph]].", &ctx, "Beta").unwrap();

    let contents = read_backlink(&ctx.backlinks_dir, "graph");
    assert_eq!(contents.matches("# graph").count(), 1);
    assert_eq!(contents, "# graph\n\n[[Alpha]]\n[[Beta]]\n");
}

#[test]
fn test_rerun_appends_again() {
    let dir = TempDir::new().unwrap();
    let ctx = IndexContext::new(dir.path());

    index("[[tokio]]", &ctx, "Runtime").unwrap();
    index("[[tokio]]", &ctx, "Runtime").unwrap();

    let contents = read_backlink(&ctx.backlinks_dir, "tokio");
    assert_eq!(contents.matches("[[Runtime]]").count(), 2);
}

#[test]
fn test_dedupe_option_keeps_one_line_per_title() {
    let dir = TempDir::new().unwrap();
    let mut ctx = IndexContext::new(dir.path());
    ctx.dedupe_backlinks = true;

    let first = index("[[tokio]] and [[tokio]]", &ctx, "Runtime").unwrap();
    let second = index("[[tokio]]", &ctx, "Runtime").unwrap();

    assert_eq!(first.backlink_refs, 1);
    assert_eq!(second.backlink_refs, 0);
    assert_eq!(read_backlink(&ctx.backlinks_dir, "tokio"), "# tokio\n\n[[Runtime]]\n");
}

#[test]
fn test_existing_file_without_header_is_repaired() {
    let dir = TempDir::new().unwrap();
    let ctx = IndexContext::new(dir.path());
    fs::create_dir_all(&ctx.backlinks_dir).unwrap();
    fs::write(ctx.backlinks_dir.join("edge.md"), "[[Legacy]]\n").unwrap();

    index("[[Edge]]", &ctx, "Fresh").unwrap();

    assert_eq!(
        read_backlink(&ctx.backlinks_dir, "edge"),
        "# edge\n\n[[Legacy]]\n[[Fresh]]\n"
    );
}

#[test]
fn test_custom_backlinks_dir_is_created() {
    let dir = TempDir::new().unwrap();
    let mut ctx = IndexContext::new(dir.path().join("out"));
    ctx.backlinks_dir = dir.path().join("deep").join("links");

    index("[[serde]]", &ctx, "Formats").unwrap();

    assert!(ctx.backlinks_dir.join("serde.md").exists());
}

#[test]
fn test_write_failure_aborts_indexing() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let ctx = IndexContext::new(&blocker);

    let err = index("[[anything]]", &ctx, "Doc").unwrap_err();
    assert!(matches!(err, LinkweaveError::IndexWriteFailed(_)));
}

#[test]
fn test_keywords_sharing_a_file_keep_one_header() {
    let dir = TempDir::new().unwrap();
    let ctx = IndexContext::new(dir.path());

    index("[[TCP/IP]] then [[tcp:ip]]", &ctx, "Net").unwrap();

    let contents = read_backlink(&ctx.backlinks_dir, "tcp_ip");
    assert_eq!(contents.lines().filter(|l| l.starts_with("# ")).count(), 1);
    assert_eq!(contents, "# tcp/ip\n\n[[Net]]\n[[Net]]\n");
}
