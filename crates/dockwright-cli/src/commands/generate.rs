use anyhow::Context;
use dockwright_core::DockwrightConfig;
use std::path::Path;

use super::layout::Layout;

pub async fn generate(path: &Path, user: Option<&str>) -> anyhow::Result<()> {
    let config = DockwrightConfig::load(Path::new("."))?;
    let repo_dir = std::fs::canonicalize(path)
        .with_context(|| format!("project directory {} not found", path.display()))?;
    let repo_name = repo_dir
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "app".to_owned());

    let layout = Layout::detect(&repo_dir)?;
    let targets = layout.write_artifacts(&repo_dir, &repo_name, user, &config)?;

    for target in &targets {
        println!(
            "Wrote {}",
            target.context.join(dockwright_build::artifacts::DOCKERFILE_NAME).display()
        );
    }
    println!(
        "Wrote {}",
        repo_dir
            .join(dockwright_build::artifacts::COMPOSE_FILE_NAME)
            .display()
    );
    for target in &targets {
        println!("Image: {}", target.image);
    }
    Ok(())
}
