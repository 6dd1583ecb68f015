use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::executor::{CommandExecutor, RealExecutor};
use crate::process::ProcessError;

/// Directory `git clone` creates for `url`: the last path segment without
/// a trailing `.git`.
///
/// Handles scp-style remotes (`git@host:owner/repo.git`) as well as URLs.
pub fn repo_dir_name(url: &str) -> Option<&str> {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    (!name.is_empty()).then_some(name)
}

// ── Git ──

/// Version control operations, parameterized over the executor for testability.
pub struct GitClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for GitClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Clone `url` under `parent` and return the checkout path.
    ///
    /// An existing directory with the target name is treated as an earlier
    /// clone and returned as is.
    pub async fn clone_repository(&self, url: &str, parent: &Path) -> Result<PathBuf, CloneError> {
        let name = repo_dir_name(url).ok_or_else(|| CloneError::InvalidUrl(url.to_owned()))?;
        let target = parent.join(name);

        if target.exists() {
            tracing::info!(path = %target.display(), "repository already cloned, skipping");
            return Ok(target);
        }

        self.executor
            .run("git", &args(["clone", url]), parent)
            .await
            .map_err(|e| CloneError::Git {
                url: url.to_owned(),
                source: e,
            })?;

        Ok(target)
    }
}

// ── Docker ──

/// Registry credentials. The password is redacted from `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Authenticated,
    /// A credential was empty, no login attempted.
    Skipped,
}

/// Container build, registry and compose operations.
pub struct DockerClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Build `image` from the `Dockerfile` in `context`.
    pub async fn build_image(&self, context: &Path, image: &str) -> Result<(), EngineError> {
        self.executor
            .run(
                "docker",
                &args(["build", "-t", image, "-f", "Dockerfile", "."]),
                context,
            )
            .await
            .map_err(|e| EngineError::Build {
                image: image.to_owned(),
                source: e,
            })
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginStatus, EngineError> {
        if !credentials.is_complete() {
            tracing::warn!("registry credentials incomplete, skipping login");
            return Ok(LoginStatus::Skipped);
        }

        self.executor
            .run_with_stdin(
                "docker",
                &args(["login", "-u", &credentials.username, "--password-stdin"]),
                credentials.password.expose_secret().as_bytes(),
            )
            .await
            .map_err(|e| EngineError::Login { source: e })?;

        Ok(LoginStatus::Authenticated)
    }

    pub async fn push_image(&self, image: &str) -> Result<(), EngineError> {
        self.executor
            .run("docker", &args(["push", image]), Path::new("."))
            .await
            .map_err(|e| EngineError::Push {
                image: image.to_owned(),
                source: e,
            })
    }

    /// `docker compose up -d` using the compose file in `dir`.
    pub async fn compose_up(&self, dir: &Path) -> Result<(), EngineError> {
        self.executor
            .run("docker", &args(["compose", "up", "-d"]), dir)
            .await
            .map_err(|e| EngineError::ComposeUp { source: e })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("cannot derive a directory name from '{0}'")]
    InvalidUrl(String),

    #[error("git clone of {url} failed")]
    Git { url: String, source: ProcessError },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("docker build of {image} failed")]
    Build { image: String, source: ProcessError },

    #[error("docker login failed")]
    Login { source: ProcessError },

    #[error("docker push of {image} failed")]
    Push { image: String, source: ProcessError },

    #[error("docker compose up failed")]
    ComposeUp { source: ProcessError },
}
