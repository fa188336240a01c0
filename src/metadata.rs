use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical name of the metadata-bearing file inside a post folder.
pub const METADATA_FILE: &str = "index.qmd";
const METADATA_EXTENSION: &str = "qmd";

// line-anchored: field name, colon, optional quote, lazy value, optional
// quote. First match per field wins.
static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^title:\s*["']?(.*?)["']?\s*$"#).unwrap());
static DATE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^date:\s*["']?(.*?)["']?\s*$"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    /// Raw date field, e.g. `2025-01-15` or `2025-01-15 12:34`.
    pub date: String,
}

/// Extract `title` and `date` from a post folder's front matter.
///
/// Best-effort by design: a missing file, an unreadable file, or a missing
/// field all yield `None`, never an error. Callers skip such folders.
pub fn read_metadata(folder: &Path) -> Option<PostMetadata> {
    let path = metadata_file(folder)?;
    let content = std::fs::read_to_string(&path).ok()?;
    let title = TITLE_LINE.captures(&content)?[1].trim().to_string();
    let date = DATE_LINE.captures(&content)?[1].trim().to_string();
    Some(PostMetadata { title, date })
}

fn metadata_file(folder: &Path) -> Option<PathBuf> {
    let canonical = folder.join(METADATA_FILE);
    if canonical.is_file() {
        return Some(canonical);
    }

    debug!("no {METADATA_FILE} in {folder:?}, falling back to first .{METADATA_EXTENSION}");
    // lexical order, so repeated scans pick the same file
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(folder)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == METADATA_EXTENSION)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
