//! Duplicate output file reconciliation.
//!
//! Markdown files in one directory whose names collide after
//! normalization (`note.md`, `Note.md`, `NOTE (1).md`) form a group.
//! The member created first survives; the others are deleted. Files
//! with equal timestamps keep name order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::error::{LinkweaveError, Result};

// Trailing " (N)" added by file managers and sync clients
static COPY_COUNTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+\)$").unwrap());

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Groups with more than one member
    pub groups: usize,

    /// Files deleted
    pub removed: Vec<PathBuf>,

    /// Files that could not be inspected or deleted
    pub failed: usize,
}

/// Collision key for a file name
pub fn normalized_key(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    COPY_COUNTER
        .replace(&stem, "")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Creation time, or modification time where birth time is unavailable
fn created_at(path: &Path) -> std::io::Result<SystemTime> {
    let metadata = fs::metadata(path)?;
    metadata.created().or_else(|_| metadata.modified())
}

/// Deduplicate the `*.md` files directly inside `dir`
pub fn reconcile(dir: &Path) -> Result<ReconcileReport> {
    let entries = fs::read_dir(dir).map_err(|e| {
        LinkweaveError::ReconcileFailed(format!("Cannot read {}: {e}", dir.display()))
    })?;

    let files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                None
            }
        })
        .filter(|p| {
            p.is_file()
                && p
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("md"))
        })
        .collect();

    Ok(reconcile_files(files))
}

/// Deduplicate an already-listed set of files.
///
/// Members that vanish or cannot be deleted after listing are logged
/// and counted in `failed`; the remaining groups are still processed.
pub fn reconcile_files(mut files: Vec<PathBuf>) -> ReconcileReport {
    files.sort();

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in files {
        let key = normalized_key(&path);
        if !key.is_empty() {
            groups.entry(key).or_default().push(path);
        }
    }

    let mut report = ReconcileReport::default();

    for (key, members) in groups {
        if members.len() < 2 {
            continue;
        }
        report.groups += 1;

        let mut timed = Vec::with_capacity(members.len());
        for path in members {
            match created_at(&path) {
                Ok(time) => timed.push((time, path)),
                Err(e) => {
                    tracing::warn!("Cannot stat {:?}: {}", path, e);
                    report.failed += 1;
                }
            }
        }
        // Stable: equal timestamps keep name order
        timed.sort_by_key(|(time, _)| *time);

        let mut members = timed.into_iter().map(|(_, path)| path);
        let Some(keeper) = members.next() else {
            continue;
        };

        for duplicate in members {
            match fs::remove_file(&duplicate) {
                Ok(()) => {
                    tracing::info!("Removed duplicate {:?} (keeping {:?})", duplicate, keeper);
                    report.removed.push(duplicate);
                }
                Err(e) => {
                    tracing::warn!("Failed to remove duplicate {:?}: {}", duplicate, e);
                    report.failed += 1;
                }
            }
        }
        tracing::debug!("Reconciled group '{}'", key);
    }

    report
}
