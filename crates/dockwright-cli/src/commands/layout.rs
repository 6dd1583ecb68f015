use anyhow::Context;
use dockwright_build::compose::{self, ComposeGenerator, ServiceSpec};
use dockwright_build::{DockerfileGenerator, RenderError, artifacts};
use dockwright_core::{DockwrightConfig, MultiService, ProjectMeta, TechStack};
use std::path::{Path, PathBuf};

/// One directory that gets its own image.
pub(crate) struct Service {
    pub dir: PathBuf,
    pub stack: TechStack,
    pub meta: ProjectMeta,
}

impl Service {
    fn detect(dir: &Path) -> anyhow::Result<Self> {
        let stack = TechStack::detect(dir)?;
        let meta = ProjectMeta::detect(dir, &stack);
        Ok(Self {
            dir: dir.to_path_buf(),
            stack,
            meta,
        })
    }

    fn dir_name(&self) -> String {
        self.dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn write_dockerfile(&self, config: &DockwrightConfig) -> anyhow::Result<()> {
        let dockerfile = DockerfileGenerator::new(&config.images, &self.stack, &self.meta)
            .render()
            .with_context(|| format!("cannot containerize {}", self.dir.display()))?;
        artifacts::write_dockerfile(&self.dir, &dockerfile)?;
        Ok(())
    }
}

/// An image to build from `context` and push as `image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildTarget {
    pub context: PathBuf,
    pub image: String,
}

/// How a repository is containerized.
pub(crate) enum Layout {
    /// The repository root is a single application.
    Single(Service),
    /// The root has no supported stack but holds frontend and backend
    /// directories.
    Split { frontend: Service, backend: Service },
}

impl Layout {
    pub fn detect(repo: &Path) -> anyhow::Result<Self> {
        let root = Service::detect(repo)?;
        if root.stack.is_renderable() {
            return Ok(Self::Single(root));
        }

        let multi = MultiService::detect(repo);
        match (multi.frontend, multi.backend) {
            (Some(frontend), Some(backend)) => {
                tracing::info!(
                    frontend = %frontend.display(),
                    backend = %backend.display(),
                    "using frontend/backend layout"
                );
                Ok(Self::Split {
                    frontend: Service::detect(&frontend)?,
                    backend: Service::detect(&backend)?,
                })
            }
            _ => Err(RenderError::UnsupportedStack(root.stack.primary).into()),
        }
    }

    /// Write Dockerfile(s) and the root compose file; returns the images
    /// to build, backend first.
    pub fn write_artifacts(
        &self,
        repo: &Path,
        repo_name: &str,
        namespace: Option<&str>,
        config: &DockwrightConfig,
    ) -> anyhow::Result<Vec<BuildTarget>> {
        let registry = &config.registry;
        match self {
            Self::Single(service) => {
                let image = registry.image_name(namespace, repo_name);
                service.write_dockerfile(config)?;
                let compose =
                    ComposeGenerator::new(&config.compose, &service.stack, &service.meta, &image)
                        .render()?;
                artifacts::write_compose(repo, &compose)?;

                Ok(vec![BuildTarget {
                    context: service.dir.clone(),
                    image,
                }])
            }
            Self::Split { frontend, backend } => {
                let frontend_image =
                    registry.image_name(namespace, &format!("{repo_name}-frontend"));
                let backend_image =
                    registry.image_name(namespace, &format!("{repo_name}-backend"));
                backend.write_dockerfile(config)?;
                frontend.write_dockerfile(config)?;

                let frontend_dir = frontend.dir_name();
                let backend_dir = backend.dir_name();
                let compose = compose::render_multi(
                    &config.compose,
                    ServiceSpec {
                        dir: &frontend_dir,
                        meta: &frontend.meta,
                        image: &frontend_image,
                    },
                    ServiceSpec {
                        dir: &backend_dir,
                        meta: &backend.meta,
                        image: &backend_image,
                    },
                )?;
                artifacts::write_compose(repo, &compose)?;

                Ok(vec![
                    BuildTarget {
                        context: backend.dir.clone(),
                        image: backend_image,
                    },
                    BuildTarget {
                        context: frontend.dir.clone(),
                        image: frontend_image,
                    },
                ])
            }
        }
    }
}
