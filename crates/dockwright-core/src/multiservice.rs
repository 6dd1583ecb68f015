use serde::Serialize;
use std::path::{Path, PathBuf};

/// Conventional frontend directory names, in priority order.
pub const FRONTEND_DIRS: &[&str] = &["frontend", "client", "web", "ui"];

/// Conventional backend directory names, in priority order.
pub const BACKEND_DIRS: &[&str] = &["backend", "server", "api"];

/// Frontend/backend split of a repository, if it follows one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultiService {
    pub frontend: Option<PathBuf>,
    pub backend: Option<PathBuf>,
}

impl MultiService {
    pub fn detect(repo_root: &Path) -> Self {
        let layout = Self {
            frontend: first_existing(repo_root, FRONTEND_DIRS),
            backend: first_existing(repo_root, BACKEND_DIRS),
        };
        tracing::debug!(
            frontend = ?layout.frontend,
            backend = ?layout.backend,
            "multi-service layout checked"
        );
        layout
    }

    /// Both a frontend and a backend directory were found.
    pub fn is_split(&self) -> bool {
        self.frontend.is_some() && self.backend.is_some()
    }
}

fn first_existing(root: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_dir())
}
