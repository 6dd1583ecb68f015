//! Reader for a repository's own `.env` file.
//!
//! The format is the common `KEY=value` dialect: `#` comments, blank lines,
//! values optionally wrapped in one pair of matching quotes. Lines without
//! `=` are dropped rather than rejected.

use std::collections::BTreeMap;
use std::path::Path;

use crate::scan;

/// File name looked up at the repository root.
pub const ENV_FILE_NAME: &str = ".env";

/// Parsed `.env` contents and where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub vars: BTreeMap<String, String>,
    /// Path relative to the repository root; `None` when no file was read.
    pub path: Option<String>,
}

impl EnvFile {
    /// Read `.env` at the repository root. A missing or unreadable file
    /// yields an empty mapping and no path.
    pub fn read(repo_root: &Path) -> Self {
        let Some(content) = scan::read_optional(&repo_root.join(ENV_FILE_NAME)) else {
            return Self::default();
        };

        let vars = parse(&content);
        tracing::debug!(keys = vars.len(), "read .env");
        Self {
            vars,
            path: Some(ENV_FILE_NAME.to_owned()),
        }
    }
}

/// Parse `.env` text into an ordered key/value mapping.
///
/// Later duplicates of a key overwrite earlier ones.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_owned(), unquote(value.trim()).to_owned()))
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
