//! # Configuration Loader
//!
//! This module defines the schema of the `repos.yaml` file and the functions
//! that load it. The file is a mapping with a single `repos` key holding an
//! ordered list of repository descriptors:
//!
//! ```yaml
//! repos:
//!   - name: rseries
//!     url: https://github.com/example/rseries-docs.git
//!     dir: docs        # optional, defaults to "docs"
//!     type: sphinx     # optional, defaults to "sphinx"
//! ```
//!
//! The order of the list is the order in which the pipeline processes the
//! repositories and the order in which they appear on the landing page.
//! Descriptors are loaded once and never modified during a run.

use std::fmt;
use std::path::{Component, Path};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// The documentation toolchain a repository declares.
///
/// Only Sphinx is built. Any other declared type is kept verbatim so it can
/// be logged and shown on the landing page. An empty or null `type:` means
/// the default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "Option<String>")]
pub enum DocType {
    #[default]
    Sphinx,
    Other(String),
}

impl From<Option<String>> for DocType {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(other) if other != "sphinx" && !other.trim().is_empty() => DocType::Other(other),
            _ => DocType::Sphinx,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocType::Sphinx => f.write_str("sphinx"),
            DocType::Other(other) => f.write_str(other),
        }
    }
}

/// One external repository whose documentation is aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    /// Unique name, used as the directory key in every workspace root.
    pub name: String,
    /// Clone URL passed to `git`.
    pub url: String,
    /// Documentation subdirectory inside the clone.
    #[serde(default = "default_doc_dir")]
    pub dir: String,
    /// Declared documentation toolchain.
    #[serde(default, rename = "type")]
    pub doc_type: DocType,
}

fn default_doc_dir() -> String {
    defaults::DOC_DIR.to_string()
}

/// The parsed contents of `repos.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub repos: Vec<RepositoryDescriptor>,
}

/// Parses and validates a YAML string.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        let hint = hint_for(&message);
        Error::ConfigParse { message, hint }
    })?;
    validate(&config)?;
    Ok(config)
}

/// Parses a configuration from a YAML file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

fn hint_for(message: &str) -> Option<String> {
    if message.contains("missing field `repos`") {
        Some("The file must be a mapping with a top-level 'repos:' list".to_string())
    } else if message.contains("missing field `url`") {
        Some("Every entry under 'repos:' needs a 'url:' to clone from".to_string())
    } else if message.contains("missing field `name`") {
        Some("Every entry under 'repos:' needs a unique 'name:'".to_string())
    } else {
        None
    }
}

/// Names that would collide with files the pipeline writes next to the
/// per-repository output directories.
const RESERVED_NAMES: &[&str] = &["index.html"];

/// Checks the invariants serde cannot express.
///
/// Names must be non-empty, unique and usable as a single path component,
/// since each one becomes a directory under all three workspace roots. The
/// documentation directory must stay inside the clone.
pub fn validate(config: &Config) -> Result<()> {
    let mut seen = std::collections::HashSet::new();

    for repo in &config.repos {
        if repo.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "repository name must not be empty".to_string(),
            });
        }
        if repo.name == "."
            || repo.name == ".."
            || repo.name.contains('/')
            || repo.name.contains('\\')
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "repository name '{}' must be a single directory name",
                    repo.name
                ),
            });
        }
        if RESERVED_NAMES.contains(&repo.name.as_str()) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "repository name '{}' is reserved for the landing page",
                    repo.name
                ),
            });
        }
        if !is_contained(&repo.dir) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "repository '{}' has dir '{}', which must be a relative path without '..'",
                    repo.name, repo.dir
                ),
            });
        }
        if repo.url.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("repository '{}' has an empty url", repo.name),
            });
        }
        if !seen.insert(repo.name.as_str()) {
            return Err(Error::ConfigValidation {
                message: format!("duplicate repository name '{}'", repo.name),
            });
        }
    }

    Ok(())
}

/// True when joining `dir` onto a clone directory stays inside it.
fn is_contained(dir: &str) -> bool {
    Path::new(dir)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
