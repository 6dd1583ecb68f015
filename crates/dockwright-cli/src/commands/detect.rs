use dockwright_core::{
    DatabaseKind, Framework, Language, MultiService, ProjectMeta, TechStack,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What detection found. `.env` values are never included, only keys.
#[derive(Serialize)]
struct DetectReport<'a> {
    language: Language,
    framework: Option<Framework>,
    entry_file: &'a str,
    port: &'a str,
    database: Option<DatabaseKind>,
    env_file: Option<&'a str>,
    env_keys: Vec<&'a str>,
    frontend: Option<PathBuf>,
    backend: Option<PathBuf>,
}

pub async fn detect(path: &Path, json: bool) -> anyhow::Result<()> {
    let stack = TechStack::detect(path)?;
    let meta = ProjectMeta::detect(path, &stack);
    let multi = MultiService::detect(path);

    let report = DetectReport {
        language: stack.primary,
        framework: meta.framework,
        entry_file: &meta.entry_file,
        port: &meta.port,
        database: meta.database.as_ref().map(|db| db.kind),
        env_file: meta.env_file.as_deref(),
        env_keys: meta.env.keys().map(String::as_str).collect(),
        frontend: multi.frontend,
        backend: multi.backend,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Language:   {}", report.language);
    println!(
        "Framework:  {}",
        report.framework.map_or("-", Framework::as_str)
    );
    println!("Entry file: {}", report.entry_file);
    println!("Port:       {}", report.port);
    match &meta.database {
        Some(db) => println!("Database:   {} ({})", db.kind.as_str(), db.env_var),
        None => println!("Database:   -"),
    }
    match report.env_file {
        Some(file) => println!("Env file:   {file} ({})", report.env_keys.join(", ")),
        None => println!("Env file:   -"),
    }
    if let (Some(frontend), Some(backend)) = (&report.frontend, &report.backend) {
        println!("Frontend:   {}", frontend.display());
        println!("Backend:    {}", backend.display());
    }
    if !stack.is_renderable() {
        println!();
        println!("No Dockerfile template for {}.", stack.primary);
    }
    Ok(())
}
