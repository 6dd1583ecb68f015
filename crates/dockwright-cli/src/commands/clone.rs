use anyhow::Context;
use dockwright_core::DockwrightConfig;
use dockwright_engine::{DockerClient, GitClient, LoginStatus, repo_dir_name};
use std::path::PathBuf;

use super::credentials;
use super::layout::Layout;

/// Execute the full pipeline: clone, detect, generate, build, push, start.
///
/// Stops at the first failing stage. Files written and images pushed
/// before the failure are left in place.
pub async fn clone_and_deploy(
    url: &str,
    hub_user: Option<String>,
    hub_pass: Option<String>,
) -> anyhow::Result<()> {
    let work_dir = PathBuf::from(".");
    let config = DockwrightConfig::load(&work_dir)?;
    let repo_name = repo_dir_name(url)
        .with_context(|| format!("cannot derive a repository name from '{url}'"))?
        .to_lowercase();

    // Clone
    println!("Cloning {url}...");
    let repo_dir = GitClient::new()
        .clone_repository(url, &work_dir)
        .await
        .context("clone stage failed")?;

    // Detect
    println!("Detecting tech stack...");
    let layout = Layout::detect(&repo_dir).context("detection stage failed")?;

    // Credentials
    let credentials = credentials::resolve(hub_user, hub_pass, &config.registry)?;

    // Generate
    println!("Writing Dockerfile and docker-compose.yml...");
    let targets = layout
        .write_artifacts(
            &repo_dir,
            &repo_name,
            Some(&credentials.username),
            &config,
        )
        .context("generation stage failed")?;

    // Build
    let docker = DockerClient::new();
    for target in &targets {
        println!("Building {}...", target.image);
        docker
            .build_image(&target.context, &target.image)
            .await
            .context("build stage failed")?;
    }

    // Login
    match docker
        .login(&credentials)
        .await
        .context("login stage failed")?
    {
        LoginStatus::Authenticated => println!("Logged in as {}", credentials.username),
        LoginStatus::Skipped => println!("Skipping registry login: credentials incomplete"),
    }

    // Push
    for target in &targets {
        println!("Pushing {}...", target.image);
        docker
            .push_image(&target.image)
            .await
            .context("push stage failed")?;
    }

    // Start
    println!("Starting services with docker compose...");
    docker
        .compose_up(&repo_dir)
        .await
        .context("start stage failed")?;

    println!();
    println!("{repo_name} is running.");

    Ok(())
}
