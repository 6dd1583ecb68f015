use serde::{Deserialize, Serialize};

/// File name of the optional tool configuration.
pub const CONFIG_FILE_NAME: &str = "dockwright.toml";

/// dockwright.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockwrightConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Environment variable holding the registry username
    #[serde(default = "default_username_env")]
    pub username_env: String,
    /// Environment variable holding the registry password or token
    #[serde(default = "default_password_env")]
    pub password_env: String,
    /// Tag applied to every built image
    #[serde(default = "default_tag")]
    pub tag: String,
}

/// Base images used by the Dockerfile templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_go_builder")]
    pub go_builder: String,
    #[serde(default = "default_go_runtime")]
    pub go_runtime: String,
    #[serde(default = "default_python")]
    pub python: String,
    #[serde(default = "default_node")]
    pub node: String,
    /// Image serving a static frontend bundle
    #[serde(default = "default_static_server")]
    pub static_server: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Value of the top-level `version` key
    #[serde(default = "default_compose_version")]
    pub version: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            username_env: default_username_env(),
            password_env: default_password_env(),
            tag: default_tag(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            go_builder: default_go_builder(),
            go_runtime: default_go_runtime(),
            python: default_python(),
            node: default_node(),
            static_server: default_static_server(),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            version: default_compose_version(),
        }
    }
}

impl DockwrightConfig {
    /// Load from dockwright.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

impl RegistryConfig {
    /// `namespace/repo:tag`, or `repo:tag` without a namespace.
    pub fn image_name(&self, namespace: Option<&str>, repo: &str) -> String {
        match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("{ns}/{repo}:{tag}", tag = self.tag),
            None => format!("{repo}:{tag}", tag = self.tag),
        }
    }
}

fn default_username_env() -> String {
    "DOCKERHUB_USERNAME".to_owned()
}

fn default_password_env() -> String {
    "DOCKERHUB_PASSWORD".to_owned()
}

fn default_tag() -> String {
    "latest".to_owned()
}

fn default_go_builder() -> String {
    "golang:1.22".to_owned()
}

fn default_go_runtime() -> String {
    "debian:bookworm-slim".to_owned()
}

fn default_python() -> String {
    "python:3.11-slim".to_owned()
}

fn default_node() -> String {
    "node:20".to_owned()
}

fn default_static_server() -> String {
    "nginx:alpine".to_owned()
}

fn default_compose_version() -> String {
    "3.9".to_owned()
}
