//! Input discovery for directory runs.
//!
//! Walks a directory tree and keeps markdown files that match the
//! include patterns and none of the exclude patterns. Hidden
//! directories and the pipeline's own output directories are never
//! entered, so a run over a vault that contains its output does not
//! feed annotated files back in.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{LinkweaveError, Result};

/// Pattern-filtered directory walker
pub struct FileWalker {
    include_patterns: Vec<Pattern>,
    exclude_patterns: Vec<Pattern>,

    /// Directories skipped wholesale (canonicalized when they exist)
    skip_dirs: Vec<PathBuf>,
}

impl FileWalker {
    /// Create a walker; invalid glob syntax is a `ConfigError`
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            include_patterns: compile(include_patterns, "include")?,
            exclude_patterns: compile(exclude_patterns, "exclude")?,
            skip_dirs: Vec::new(),
        })
    }

    /// Never descend into `dir`
    pub fn skip_dir(mut self, dir: &Path) -> Self {
        self.skip_dirs.push(canonical(dir));
        self
    }

    /// Collect matching files under `root`, sorted by path
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(LinkweaveError::InvalidPath(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_enter(e, root))
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.matches_patterns(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        Ok(files)
    }

    fn should_enter(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            return false;
        }

        if !self.skip_dirs.is_empty() && self.skip_dirs.contains(&canonical(path)) {
            tracing::debug!("Skipping output directory: {:?}", path);
            return false;
        }

        if self.exclude_patterns.iter().any(|p| p.matches_path(path)) {
            tracing::debug!("Skipping excluded directory: {:?}", path);
            return false;
        }

        true
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };
        let file_name = path.file_name().and_then(|f| f.to_str()).unwrap_or("");

        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches(file_name));

        included
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}

fn compile(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                LinkweaveError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
