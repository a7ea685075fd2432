// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary notes directory with a separate output directory
#[allow(dead_code)] // Used in integration tests
pub struct TestVault {
    pub dir: TempDir,
    pub notes: PathBuf,
    pub output: PathBuf,
}

impl TestVault {
    /// Create an empty vault
    #[allow(dead_code)]
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes");
        let output = dir.path().join("out");
        fs::create_dir_all(&notes).unwrap();
        Self { dir, notes, output }
    }

    /// Create a vault holding `files` (relative path, content)
    #[allow(dead_code)]
    pub fn with_notes(files: &[(&str, &str)]) -> Self {
        let vault = Self::new();
        for (path, content) in files {
            vault.add_note(path, content);
        }
        vault
    }

    #[allow(dead_code)]
    pub fn add_note(&self, path: &str, content: &str) -> PathBuf {
        let full = self.notes.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        full
    }

    #[allow(dead_code)]
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output.join(name)
    }

    #[allow(dead_code)]
    pub fn backlinks(&self) -> PathBuf {
        self.output.join("backlinks")
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// `count` paragraphs of `words` tokens each, separated by blank lines.
/// Paragraph `i` starts with the marker `P{i}`.
#[allow(dead_code)]
pub fn paragraphs(count: usize, words: usize) -> String {
    (0..count)
        .map(|i| {
            let mut para = vec![format!("P{i}")];
            para.extend((1..words).map(|w| format!("w{w}")));
            para.join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
