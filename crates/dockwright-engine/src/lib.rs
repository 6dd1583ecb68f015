//! External collaborators for dockwright: cloning repositories and driving
//! the docker CLI.
//!
//! Every operation goes through a [`CommandExecutor`], so the clients can be
//! exercised without git or docker installed.

pub mod client;
pub mod executor;
pub mod process;

pub use client::{
    CloneError, Credentials, DockerClient, EngineError, GitClient, LoginStatus, repo_dir_name,
};
pub use executor::{CommandExecutor, RealExecutor};
pub use process::ProcessError;
