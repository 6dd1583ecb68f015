use dockwright_core::Language;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unsupported tech stack: {0}")]
    UnsupportedStack(Language),

    #[error("failed to encode JSON string: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode YAML scalar: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
