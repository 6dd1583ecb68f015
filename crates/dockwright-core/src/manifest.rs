use serde_json::Value;
use std::path::Path;

use crate::scan;

/// The parts of a `package.json` the detectors care about.
///
/// Parsing is lenient: a malformed file, a non-string `main`, or a
/// non-object `dependencies` all read as absent.
#[derive(Debug, Default)]
pub(crate) struct PackageJson {
    pub main: Option<String>,
    dependencies: Vec<String>,
}

impl PackageJson {
    pub fn load(dir: &Path) -> Option<Self> {
        let content = scan::read_optional(&dir.join("package.json"))?;
        Some(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "package.json is not valid JSON");
                return Self::default();
            }
        };

        let main = value
            .get("main")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let dependencies = value
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default();

        Self { main, dependencies }
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d == name)
    }
}
