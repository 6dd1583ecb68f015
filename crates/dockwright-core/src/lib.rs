//! Core types and detection for dockwright.
//!
//! This crate inspects a checked-out repository and describes it:
//! its stack ([`TechStack`]), how to run it ([`ProjectMeta`]), which
//! database it talks to ([`DatabaseInfo`]), and whether it is split into
//! frontend and backend directories ([`MultiService`]). It also defines
//! the `dockwright.toml` schema ([`DockwrightConfig`]).
//!
//! All source inspection is plain-text matching. Nothing here verifies
//! that a detected port or entry file is right, only that it is plausible.

pub mod config;
pub mod database;
pub mod env_file;
pub mod error;
mod manifest;
pub mod multiservice;
pub mod project;
pub mod scan;
pub mod stack;

pub use config::{ComposeConfig, DockwrightConfig, ImageConfig, RegistryConfig};
pub use database::{DatabaseInfo, DatabaseKind};
pub use env_file::EnvFile;
pub use error::{Error, Result};
pub use multiservice::MultiService;
pub use project::ProjectMeta;
pub use stack::{Framework, Language, TechStack};
