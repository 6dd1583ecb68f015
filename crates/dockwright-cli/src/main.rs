mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dockwright",
    about = "Containerize a git repository: detect its stack, generate Docker artifacts, build, push and run"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository, build and push its image, and start it locally
    Clone {
        /// Repository URL
        url: String,
        /// Docker Hub username (falls back to DOCKERHUB_USERNAME, then a prompt)
        #[arg(long)]
        hub_user: Option<String>,
        /// Docker Hub password or token (falls back to DOCKERHUB_PASSWORD, then a prompt)
        #[arg(long)]
        hub_pass: Option<String>,
    },
    /// Show what dockwright detects in a local project
    Detect {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write Dockerfile and docker-compose.yml without building anything
    Generate {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Registry namespace for the image name
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env into process environment"),
        Err(e) if e.not_found() => tracing::debug!("no .env in working directory"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Clone {
            url,
            hub_user,
            hub_pass,
        } => commands::clone_and_deploy(&url, hub_user, hub_pass).await?,
        Commands::Detect { path, json } => commands::detect(&path, json).await?,
        Commands::Generate { path, user } => commands::generate(&path, user.as_deref()).await?,
    }

    Ok(())
}
