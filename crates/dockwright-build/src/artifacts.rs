use std::path::{Path, PathBuf};

/// File name of the generated container build file.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// File name of the generated orchestration file.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Write the Dockerfile into `dir`, replacing any existing one.
pub fn write_dockerfile(dir: &Path, content: &str) -> Result<PathBuf, ArtifactError> {
    write_artifact(dir, DOCKERFILE_NAME, content)
}

/// Write docker-compose.yml into `dir`, replacing any existing one.
pub fn write_compose(dir: &Path, content: &str) -> Result<PathBuf, ArtifactError> {
    write_artifact(dir, COMPOSE_FILE_NAME, content)
}

fn write_artifact(dir: &Path, name: &str, content: &str) -> Result<PathBuf, ArtifactError> {
    let path = dir.join(name);
    if path.exists() {
        tracing::debug!(path = %path.display(), "overwriting existing file");
    }
    std::fs::write(&path, content).map_err(|e| ArtifactError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to write {path}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
