use anyhow::Context;
use dockwright_core::RegistryConfig;
use dockwright_engine::Credentials;
use inquire::{Password, Text};

/// Registry credentials from flags, then environment variables, then an
/// interactive prompt. Each field is resolved on its own.
pub(crate) fn resolve(
    flag_user: Option<String>,
    flag_pass: Option<String>,
    registry: &RegistryConfig,
) -> anyhow::Result<Credentials> {
    let username = match pick(flag_user, env_value(&registry.username_env)) {
        Some(username) => username,
        None => Text::new("Docker Hub username:")
            .prompt()
            .context("failed to read registry username")?,
    };

    let password = match pick(flag_pass, env_value(&registry.password_env)) {
        Some(password) => password,
        None => Password::new("Docker Hub password:")
            .without_confirmation()
            .prompt()
            .context("failed to read registry password")?,
    };

    Ok(Credentials::new(username, password))
}

/// First non-empty source.
fn pick(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.filter(|v| !v.is_empty()).or(env)
}

fn env_value(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(var = name, error = %e, "credential variable not set");
            None
        }
    }
}
