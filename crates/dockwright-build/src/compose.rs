//! docker-compose.yml generation.
//!
//! The document is assembled from text blocks rather than serialized, so
//! the layout stays identical to the hand-written templates it mirrors.
//! Detected values (entry file, env entries, paths) are encoded as scalars
//! before they are spliced in:
//!
//! ```text
//! version / services header
//!   app service         per stack (and Django)
//!   database service    when one was detected
//! volumes               when a database service was added
//! ```

use dockwright_core::{
    ComposeConfig, DatabaseInfo, DatabaseKind, Framework, Language, ProjectMeta, TechStack,
};

use crate::RenderError;
use crate::scalar::{json_string, yaml_scalar};

/// Named volumes declared whenever a database service is present.
const DATABASE_VOLUMES: &[&str] = &["mongo_data", "pg_data", "mysql_data"];

/// Port the frontend service is published on in split layouts.
const FRONTEND_PORT: u16 = 3000;

/// Port the static file server image listens on.
const STATIC_SERVER_PORT: &str = "80";

/// Generates the single-application compose document.
pub struct ComposeGenerator<'a> {
    config: &'a ComposeConfig,
    stack: &'a TechStack,
    meta: &'a ProjectMeta,
    image: &'a str,
}

impl<'a> ComposeGenerator<'a> {
    pub fn new(
        config: &'a ComposeConfig,
        stack: &'a TechStack,
        meta: &'a ProjectMeta,
        image: &'a str,
    ) -> Self {
        Self {
            config,
            stack,
            meta,
            image,
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let port = self.meta.port.as_str();
        let entry = self.meta.entry_file.as_str();
        let app = match self.stack.primary {
            Language::Node => match self.meta.framework {
                Some(Framework::NextJs) => self.app_service("nextjs_app", "3000", "3000", None)?,
                Some(Framework::React) => {
                    self.app_service("react_app", "3000", STATIC_SERVER_PORT, None)?
                }
                _ => self.app_service(
                    "node_app",
                    port,
                    port,
                    Some(format!(r#"["node", {}]"#, json_string(entry)?)),
                )?,
            },
            Language::Python if self.meta.framework == Some(Framework::Django) => self.django()?,
            Language::Python => self.app_service(
                "python_app",
                port,
                port,
                Some(format!(r#"["python", {}]"#, json_string(entry)?)),
            )?,
            Language::Go => self.app_service("go_app", "8080", "8080", None)?,
            other => return Err(RenderError::UnsupportedStack(other)),
        };

        let mut doc = header(self.config);
        doc.push_str(&app);

        if let Some(db) = &self.meta.database {
            doc.push_str(&database_service(db.kind));
            doc.push_str(&volumes(DATABASE_VOLUMES));
        }

        tracing::debug!(
            language = %self.stack.primary,
            database = self.meta.database.as_ref().map(|db| db.kind.as_str()),
            "compose file rendered"
        );
        Ok(doc)
    }

    fn app_service(
        &self,
        container_name: &str,
        published: &str,
        target: &str,
        command: Option<String>,
    ) -> Result<String, RenderError> {
        let mut block = format!(
            r#"  app:
    image: {image}
    container_name: {container_name}
    ports:
      - "{published}:{target}"
"#,
            image = yaml_scalar(self.image)?,
        );
        block.push_str(&environment_section(self.meta, None)?);
        if let Some(command) = command {
            block.push_str(&format!("    command: {command}\n"));
        }
        Ok(block)
    }

    fn django(&self) -> Result<String, RenderError> {
        Ok(format!(
            r#"  app:
    image: {image}
    container_name: django_app
    ports:
      - "8000:8000"
{env}    command: >
      sh -c "python manage.py migrate &&
             gunicorn project.wsgi:application --bind 0.0.0.0:8000"
"#,
            image = yaml_scalar(self.image)?,
            env = environment_section(self.meta, None)?,
        ))
    }
}

/// One side of a frontend/backend split.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSpec<'a> {
    /// Directory name relative to the repository root.
    pub dir: &'a str,
    pub meta: &'a ProjectMeta,
    pub image: &'a str,
}

/// Compose document for a frontend/backend split.
///
/// A database service is always included: the backend's detected
/// database, or MongoDB when none was found.
pub fn render_multi(
    config: &ComposeConfig,
    frontend: ServiceSpec<'_>,
    backend: ServiceSpec<'_>,
) -> Result<String, RenderError> {
    let database = backend
        .meta
        .database
        .as_ref()
        .map_or(DatabaseKind::Mongo, |db| db.kind);

    let mut doc = header(config);
    doc.push_str(&format!(
        r#"
  backend:
    image: {image}
    ports:
      - "{port}:{port}"
{env}
  frontend:
    image: {frontend_image}
    ports:
      - "{FRONTEND_PORT}:{FRONTEND_PORT}"
    depends_on:
      - backend
"#,
        image = yaml_scalar(backend.image)?,
        port = backend.meta.port,
        env = environment_section(backend.meta, Some(backend.dir))?,
        frontend_image = yaml_scalar(frontend.image)?,
    ));
    doc.push_str(&database_service(database));
    if let Some(volume) = volume_name(database) {
        doc.push_str(&volumes(&[volume]));
    }
    Ok(doc)
}

fn header(config: &ComposeConfig) -> String {
    format!("version: '{}'\n\nservices:\n", config.version)
}

/// `env_file` reference or inline `environment` entries, plus the database
/// connection variable when the application does not set it itself.
///
/// `env_dir` prefixes the env file path for services built from a
/// subdirectory.
fn environment_section(
    meta: &ProjectMeta,
    env_dir: Option<&str>,
) -> Result<String, RenderError> {
    let mut section = String::new();
    let mut entries: Vec<String> = Vec::new();

    match &meta.env_file {
        Some(path) => {
            let path = match env_dir {
                Some(dir) => format!("./{dir}/{path}"),
                None => path.clone(),
            };
            section.push_str(&format!("    env_file:\n      - {}\n", yaml_scalar(&path)?));
        }
        None => entries.extend(
            meta.env
                .iter()
                .map(|(key, value)| env_entry(key, &value.replace('"', "'"))),
        ),
    }

    if let Some(db) = meta.needs_database_env() {
        entries.push(database_entry(db));
    }

    if !entries.is_empty() {
        section.push_str("    environment:\n");
        for entry in entries {
            section.push_str(&format!("      - {}\n", yaml_scalar(&entry)?));
        }
    }
    Ok(section)
}

fn database_entry(db: &DatabaseInfo) -> String {
    env_entry(db.env_var, db.default_uri)
}

fn env_entry(key: &str, value: &str) -> String {
    format!("{key}={value}")
}

fn database_service(kind: DatabaseKind) -> String {
    let block = match kind {
        DatabaseKind::Mongo => {
            r#"
  mongo:
    image: mongo
    ports:
      - "27017:27017"
    volumes:
      - mongo_data:/data/db
"#
        }
        DatabaseKind::Postgres => {
            r#"
  postgres:
    image: postgres
    environment:
      POSTGRES_PASSWORD: password
    ports:
      - "5432:5432"
    volumes:
      - pg_data:/var/lib/postgresql/data
"#
        }
        DatabaseKind::Mysql => {
            r#"
  mysql:
    image: mysql:8
    environment:
      MYSQL_ROOT_PASSWORD: password
    ports:
      - "3306:3306"
    volumes:
      - mysql_data:/var/lib/mysql
"#
        }
        DatabaseKind::Redis => {
            r#"
  redis:
    image: redis
    ports:
      - "6379:6379"
"#
        }
    };
    block.to_owned()
}

fn volume_name(kind: DatabaseKind) -> Option<&'static str> {
    match kind {
        DatabaseKind::Mongo => Some("mongo_data"),
        DatabaseKind::Postgres => Some("pg_data"),
        DatabaseKind::Mysql => Some("mysql_data"),
        DatabaseKind::Redis => None,
    }
}

fn volumes(names: &[&str]) -> String {
    let mut section = String::from("\nvolumes:\n");
    for name in names {
        section.push_str(&format!("  {name}:\n"));
    }
    section
}
