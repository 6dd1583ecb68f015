//! Technology stack detection.
//!
//! A repository's stack is decided from marker files at its root, checked
//! in a fixed priority order. When no marker is present the whole tree is
//! walked and the dominant source extension decides.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::manifest::PackageJson;
use crate::scan;

/// Primary language ecosystem of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Go,
    Python,
    Node,
    JavaMaven,
    JavaGradle,
    /// Plain `.js` sources without a `package.json`.
    #[serde(rename = "javascript")]
    JavaScript,
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Python => "python",
            Self::Node => "node",
            Self::JavaMaven => "java-maven",
            Self::JavaGradle => "java-gradle",
            Self::JavaScript => "javascript",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application framework, where one can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    NextJs,
    React,
    Express,
    NestJs,
    Django,
    Flask,
    FastApi,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextJs => "nextjs",
            Self::React => "react",
            Self::Express => "express",
            Self::NestJs => "nestjs",
            Self::Django => "django",
            Self::Flask => "flask",
            Self::FastApi => "fastapi",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker files in priority order. The first one present decides the stack.
const MARKERS: &[(&str, Language)] = &[
    ("go.mod", Language::Go),
    ("requirements.txt", Language::Python),
    ("package.json", Language::Node),
    ("pom.xml", Language::JavaMaven),
    ("build.gradle", Language::JavaGradle),
];

/// Detected language plus, for Node, an initial framework guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechStack {
    pub primary: Language,
    pub framework: Option<Framework>,
}

impl TechStack {
    pub fn new(primary: Language) -> Self {
        Self {
            primary,
            framework: None,
        }
    }

    /// Detect the stack of the repository rooted at `repo_root`.
    ///
    /// # Errors
    ///
    /// [`Error::RepoRead`](crate::Error::RepoRead) if the root directory
    /// cannot be listed. Failures deeper in the tree are skipped.
    pub fn detect(repo_root: &Path) -> crate::Result<Self> {
        let entries = root_entries(repo_root)?;

        let marker = MARKERS
            .iter()
            .find(|(name, _)| entries.contains(*name))
            .map(|(name, language)| (*name, *language));

        let stack = match marker {
            Some((_, Language::Node)) => Self::detect_node(repo_root),
            Some((_, language)) => Self::new(language),
            None => Self::new(Self::dominant_language(repo_root)),
        };

        tracing::debug!(
            root = %repo_root.display(),
            marker = marker.map(|(name, _)| name),
            language = %stack.primary,
            framework = stack.framework.map(Framework::as_str),
            "stack detected"
        );

        Ok(stack)
    }

    /// Node framework sub-check: `next` beats `react`, otherwise bare Node.
    fn detect_node(repo_root: &Path) -> Self {
        let framework = PackageJson::load(repo_root).and_then(|pkg| {
            if pkg.depends_on("next") {
                Some(Framework::NextJs)
            } else if pkg.depends_on("react") {
                Some(Framework::React)
            } else {
                None
            }
        });

        Self {
            primary: Language::Node,
            framework,
        }
    }

    /// Count source files by extension; a strict majority wins.
    fn dominant_language(repo_root: &Path) -> Language {
        let counts = ExtensionCounts::tally(repo_root);
        tracing::debug!(
            python = counts.python,
            go = counts.go,
            javascript = counts.javascript,
            "no marker file; counted source extensions"
        );
        counts.winner()
    }

    /// Whether the container renderers have templates for this stack.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self.primary,
            Language::Go | Language::Python | Language::Node
        )
    }
}

fn root_entries(repo_root: &Path) -> crate::Result<HashSet<String>> {
    let read_dir = std::fs::read_dir(repo_root).map_err(|e| crate::Error::RepoRead {
        path: repo_root.to_path_buf(),
        source: e,
    })?;

    let mut names = HashSet::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| crate::Error::RepoRead {
            path: repo_root.to_path_buf(),
            source: e,
        })?;
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_owned());
        }
    }
    Ok(names)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ExtensionCounts {
    python: usize,
    go: usize,
    javascript: usize,
}

impl ExtensionCounts {
    fn tally(root: &Path) -> Self {
        let mut counts = Self::default();
        for path in scan::walk_files(root) {
            match path.extension().and_then(|e| e.to_str()) {
                Some("py") => counts.python += 1,
                Some("go") => counts.go += 1,
                Some("js" | "jsx") => counts.javascript += 1,
                _ => {}
            }
        }
        counts
    }

    fn winner(&self) -> Language {
        let Self {
            python,
            go,
            javascript,
        } = *self;

        if python > go && python > javascript {
            Language::Python
        } else if go > python && go > javascript {
            Language::Go
        } else if javascript > python && javascript > go {
            Language::JavaScript
        } else {
            Language::Unknown
        }
    }
}
