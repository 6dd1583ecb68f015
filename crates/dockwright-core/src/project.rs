//! Project metadata inference.
//!
//! Metadata is assembled in stages, each taking the previous value and
//! returning a new one:
//!
//! ```text
//! ProjectMeta::for_stack   entry file, port, framework (per language)
//!   .with_env(..)          repository .env
//!   .with_database(..)     database dependency
//! ```
//!
//! Within the Node and Python stages, manifest evidence is applied before
//! filename conventions and source scans, so later evidence overwrites
//! earlier evidence.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::database::DatabaseInfo;
use crate::env_file::EnvFile;
use crate::manifest::PackageJson;
use crate::scan;
use crate::stack::{Framework, Language, TechStack};

const NODE_ENTRY_CANDIDATES: &[&str] = &["server.js", "app.js", "index.js"];
const PYTHON_ENTRY_CANDIDATES: &[&str] = &["app.py", "main.py", "run.py"];

const NODE_DEFAULT_PORT: &str = "3000";
const FLASK_DEFAULT_PORT: &str = "5000";
const PYTHON_DEFAULT_PORT: &str = "8000";
const GO_DEFAULT_PORT: &str = "8080";

static NODE_LISTEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"listen\(([0-9]+)\)").expect("valid regex"));
static PYTHON_RUN_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"run\(.*port\s*=\s*([0-9]+)").expect("valid regex"));

/// Everything the renderers need to know about an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMeta {
    /// File the container executes, relative to the repository root.
    pub entry_file: String,
    /// Port the application listens on.
    pub port: String,
    pub framework: Option<Framework>,
    pub database: Option<DatabaseInfo>,
    /// Variables from the repository's `.env`, ordered by key.
    pub env: BTreeMap<String, String>,
    /// Set when `.env` was found; the compose file then references it.
    pub env_file: Option<String>,
}

impl ProjectMeta {
    /// Run the full metadata chain for an already-detected stack.
    pub fn detect(repo_root: &Path, stack: &TechStack) -> Self {
        Self::for_stack(repo_root, stack)
            .with_env(EnvFile::read(repo_root))
            .with_database(DatabaseInfo::detect(repo_root))
    }

    /// Language-specific entry file, port and framework.
    pub fn for_stack(repo_root: &Path, stack: &TechStack) -> Self {
        let meta = match stack.primary {
            Language::Node => Self::detect_node(repo_root),
            Language::Python => Self::detect_python(repo_root),
            _ => Self::go_default(),
        };
        tracing::debug!(
            language = %stack.primary,
            entry_file = %meta.entry_file,
            port = %meta.port,
            framework = meta.framework.map(Framework::as_str),
            "project metadata detected"
        );
        meta
    }

    /// Fixed metadata for Go and for stacks without source inspection.
    pub fn go_default() -> Self {
        Self {
            entry_file: "main.go".to_owned(),
            port: GO_DEFAULT_PORT.to_owned(),
            ..Self::default()
        }
    }

    /// Node: `package.json` first, then conventional entry files (which
    /// override `main`), then `listen(<port>)` in every `.js` file.
    pub fn detect_node(repo_root: &Path) -> Self {
        let pkg = PackageJson::load(repo_root);

        let manifest_entry = pkg.as_ref().and_then(|p| p.main.clone());
        let framework = pkg.as_ref().and_then(node_framework);

        let entry_file = first_existing(repo_root, NODE_ENTRY_CANDIDATES)
            .or(manifest_entry)
            .unwrap_or_else(|| "index.js".to_owned());

        let port = last_capture(repo_root, &["js"], &NODE_LISTEN)
            .unwrap_or_else(|| NODE_DEFAULT_PORT.to_owned());

        Self {
            entry_file,
            port,
            framework,
            ..Self::default()
        }
    }

    /// Python: `manage.py` means Django and ends the scan; otherwise every
    /// `.py` file is checked for Flask/FastAPI imports and `run(..port=N)`.
    pub fn detect_python(repo_root: &Path) -> Self {
        if scan::has_file(repo_root, "manage.py") {
            return Self {
                entry_file: "manage.py".to_owned(),
                port: PYTHON_DEFAULT_PORT.to_owned(),
                framework: Some(Framework::Django),
                ..Self::default()
            };
        }

        let entry_file =
            first_existing(repo_root, PYTHON_ENTRY_CANDIDATES).unwrap_or_else(|| "app.py".to_owned());

        let mut framework = None;
        let mut port = None;
        for path in scan::files_with_extensions(repo_root, &["py"]) {
            let Some(content) = scan::read_optional(&path) else {
                continue;
            };
            framework = python_framework(&content).or(framework);
            port = first_capture(&content, &PYTHON_RUN_PORT).or(port);
        }

        let port = port.unwrap_or_else(|| match framework {
            Some(Framework::Flask) => FLASK_DEFAULT_PORT.to_owned(),
            _ => PYTHON_DEFAULT_PORT.to_owned(),
        });

        Self {
            entry_file,
            port,
            framework,
            ..Self::default()
        }
    }

    /// Attach the repository's `.env` contents.
    pub fn with_env(self, env_file: EnvFile) -> Self {
        Self {
            env: env_file.vars,
            env_file: env_file.path,
            ..self
        }
    }

    /// Attach a detected database. A database already recorded is kept.
    pub fn with_database(self, database: Option<DatabaseInfo>) -> Self {
        Self {
            database: self.database.or(database),
            ..self
        }
    }

    /// Whether the database connection variable still needs to be injected.
    pub fn needs_database_env(&self) -> Option<&DatabaseInfo> {
        self.database
            .as_ref()
            .filter(|db| !self.env.contains_key(db.env_var))
    }
}

/// Independent checks in a fixed order; the last dependency present wins.
fn node_framework(pkg: &PackageJson) -> Option<Framework> {
    [
        ("express", Framework::Express),
        ("next", Framework::NextJs),
        ("react", Framework::React),
        ("nest", Framework::NestJs),
    ]
    .into_iter()
    .filter(|(dep, _)| pkg.depends_on(dep))
    .map(|(_, framework)| framework)
    .last()
}

/// A file importing both Flask and FastAPI reads as FastAPI.
fn python_framework(content: &str) -> Option<Framework> {
    if content.contains("fastapi import") {
        Some(Framework::FastApi)
    } else if content.contains("from flask") {
        Some(Framework::Flask)
    } else {
        None
    }
}

fn first_existing(dir: &Path, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|name| scan::has_file(dir, name))
        .map(|name| (*name).to_owned())
}

fn first_capture(content: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Capture from the last file (in walk order) that matches `pattern`.
fn last_capture(root: &Path, extensions: &[&str], pattern: &Regex) -> Option<String> {
    scan::files_with_extensions(root, extensions)
        .iter()
        .filter_map(|path| scan::read_optional(path))
        .filter_map(|content| first_capture(&content, pattern))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseKind;

    #[test]
    fn node_framework_last_check_wins() {
        let pkg = PackageJson::parse(r#"{"dependencies": {"nest": "1", "next": "13"}}"#);
        assert_eq!(node_framework(&pkg), Some(Framework::NestJs));

        let pkg = PackageJson::parse(r#"{"dependencies": {"express": "4", "react": "18"}}"#);
        assert_eq!(node_framework(&pkg), Some(Framework::React));

        let pkg = PackageJson::parse(r#"{"dependencies": {"lodash": "4"}}"#);
        assert_eq!(node_framework(&pkg), None);
    }

    #[test]
    fn python_framework_prefers_fastapi_in_same_file() {
        let both = "from flask import Flask\nfrom fastapi import FastAPI\n";
        assert_eq!(python_framework(both), Some(Framework::FastApi));
        assert_eq!(
            python_framework("from flask import Flask"),
            Some(Framework::Flask)
        );
        assert_eq!(python_framework("import os"), None);
    }

    #[test]
    fn run_port_pattern_needs_run_call() {
        assert_eq!(
            first_capture("app.run(host='0.0.0.0', port = 5001)", &PYTHON_RUN_PORT),
            Some("5001".to_owned())
        );
        assert_eq!(first_capture("PORT = 5001", &PYTHON_RUN_PORT), None);
    }

    #[test]
    fn listen_pattern_needs_literal_port() {
        assert_eq!(
            first_capture("app.listen(4000)", &NODE_LISTEN),
            Some("4000".to_owned())
        );
        assert_eq!(first_capture("app.listen(PORT)", &NODE_LISTEN), None);
    }

    #[test]
    fn with_env_records_vars_and_path() {
        let mut vars = BTreeMap::new();
        vars.insert("A".to_owned(), "1".to_owned());
        let meta = ProjectMeta::go_default().with_env(EnvFile {
            vars,
            path: Some(".env".to_owned()),
        });

        assert_eq!(meta.env["A"], "1");
        assert_eq!(meta.env_file.as_deref(), Some(".env"));
        assert_eq!(meta.entry_file, "main.go");
    }

    #[test]
    fn with_database_keeps_first_detection() {
        let meta = ProjectMeta::go_default()
            .with_database(Some(DatabaseKind::Redis.into()))
            .with_database(Some(DatabaseKind::Mongo.into()));
        assert_eq!(meta.database.map(|d| d.kind), Some(DatabaseKind::Redis));
    }

    #[test]
    fn database_env_not_needed_when_already_set() {
        let mut meta =
            ProjectMeta::go_default().with_database(Some(DatabaseKind::Postgres.into()));
        assert!(meta.needs_database_env().is_some());

        meta.env
            .insert("DATABASE_URL".to_owned(), "postgres://x".to_owned());
        assert!(meta.needs_database_env().is_none());
    }
}
