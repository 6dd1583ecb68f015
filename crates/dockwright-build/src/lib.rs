//! Dockerfile and docker-compose.yml generation for dockwright.
//!
//! # Pipeline
//!
//! ```text
//! dockwright clone <url>
//!   1. Detect       ── TechStack + ProjectMeta (dockwright-core)
//!   2. Dockerfile   ── DockerfileGenerator::render()
//!   3. Compose      ── ComposeGenerator::render() / compose::render_multi()
//!   4. Write        ── artifacts::write_dockerfile / write_compose
//! ```
//!
//! Both renderers are pure functions of the detected stack and metadata;
//! neither depends on the other. Stacks without a template (Java, bare
//! JavaScript, unknown) are rejected with [`RenderError::UnsupportedStack`].

pub mod artifacts;
pub mod compose;
pub mod dockerfile;
pub mod error;
mod scalar;

pub use artifacts::ArtifactError;
pub use compose::{ComposeGenerator, ServiceSpec};
pub use dockerfile::DockerfileGenerator;
pub use error::RenderError;
