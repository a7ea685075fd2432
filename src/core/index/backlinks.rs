//! Append-only backlink files.
//!
//! `{backlinks_dir}/{keyword}.md` starts with a `# keyword` header and
//! then lists one `[[title]]` line per reference, in call order.
//! Repeated runs append again unless `dedupe_backlinks` is set.
//!
//! Keywords that sanitize to the same stem share one file. Whatever
//! `# ` line the file starts with is its header, so a file never
//! gains a second one.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::IndexContext;
use crate::core::error::{LinkweaveError, Result};

/// What happened to a backlink file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklinkWrite {
    /// File was absent; header and reference written
    Created,

    /// Reference appended under the existing header
    Appended,

    /// File had no `# ` header line; header prepended, reference appended
    HeaderRepaired,

    /// Dedupe is on and the title was already listed
    AlreadyListed,
}

/// Backlink file path for a normalized keyword
pub fn backlink_path(backlinks_dir: &Path, keyword: &str) -> PathBuf {
    backlinks_dir.join(format!("{}.md", sanitize_file_stem(keyword)))
}

/// Record one reference from `source_title` to `keyword`
pub fn record_backlink(
    ctx: &IndexContext,
    keyword: &str,
    source_title: &str,
) -> Result<BacklinkWrite> {
    let path = backlink_path(&ctx.backlinks_dir, keyword);
    let header = format!("# {keyword}");
    let reference = format!("[[{source_title}]]");

    let write_err = |e: std::io::Error| {
        LinkweaveError::IndexWriteFailed(format!("{}: {e}", path.display()))
    };

    fs::create_dir_all(&ctx.backlinks_dir).map_err(|e| {
        LinkweaveError::IndexWriteFailed(format!("{}: {e}", ctx.backlinks_dir.display()))
    })?;

    let existing = match fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_err(e)),
    };

    let Some(existing) = existing else {
        fs::write(&path, format!("{header}\n\n{reference}\n")).map_err(write_err)?;
        return Ok(BacklinkWrite::Created);
    };

    if ctx.dedupe_backlinks && existing.lines().any(|l| l.trim() == reference) {
        return Ok(BacklinkWrite::AlreadyListed);
    }

    let has_header = existing
        .lines()
        .next()
        .is_some_and(|first| first.starts_with("# "));

    if !has_header {
        let mut body = existing;
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        fs::write(&path, format!("{header}\n\n{body}{reference}\n")).map_err(write_err)?;
        return Ok(BacklinkWrite::HeaderRepaired);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(write_err)?;
    let line = if existing.ends_with('\n') {
        format!("{reference}\n")
    } else {
        format!("\n{reference}\n")
    };
    file.write_all(line.as_bytes()).map_err(write_err)?;

    Ok(BacklinkWrite::Appended)
}

/// Make a keyword or title safe as a file stem on common filesystems
pub fn sanitize_file_stem(keyword: &str) -> String {
    let cleaned: String = keyword
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());

    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
