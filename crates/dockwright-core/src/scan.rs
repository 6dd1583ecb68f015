//! Filesystem helpers shared by the detectors.
//!
//! Every read here is best-effort: a file that cannot be read counts as
//! "no evidence" and the scan moves on.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Read a file as text, or `None` if it is missing or unreadable.
///
/// Invalid UTF-8 sequences are replaced, so a stray Latin-1 byte does not
/// hide the rest of the file from the detectors.
pub fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Whether `name` exists as a regular file directly under `dir`.
pub fn has_file(dir: &Path, name: &str) -> bool {
    dir.join(name).is_file()
}

/// All files under `root` whose extension is one of `extensions`.
///
/// Paths are returned in walk order: depth-first, siblings sorted by file
/// name. Detectors that say "last match wins" mean last in this order.
pub fn files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    walk_files(root)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .collect()
}

/// Every regular file under `root`, in deterministic walk order.
pub fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable walk entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}
