//! # Repository Fetcher
//!
//! This module provides the `RepositoryFetcher`, which shallow-clones one
//! configured repository into the clone root and locates its documentation
//! subdirectory.
//!
//! ## Failure model
//!
//! A fetch can come back unavailable in two ways, and neither stops the run:
//!
//! - **Clone failure**: `git` could not produce a checkout (network error,
//!   invalid URL, authentication required, `git` missing). Logged as an error.
//! - **Missing documentation**: the clone succeeded but the configured
//!   subdirectory does not exist. Logged as a warning.
//!
//! Only local filesystem errors while clearing a previous clone are returned
//! as `Err`, since they mean the workspace itself is broken.
//!
//! ## Design
//!
//! Cloning goes through the `GitOperations` trait. The binary uses
//! `DefaultGitOperations`, which wraps the system `git` command; tests inject
//! mock implementations to simulate clones without touching the network.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::RepositoryDescriptor;
use crate::error::{Error, Result};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Clones the default branch of `url` into `target_dir` with depth 1.
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real clones.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, target_dir)
    }
}

/// Why a repository's documentation is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The clone itself failed; carries the rendered clone error.
    Clone(String),
    /// The clone succeeded but the documentation subdirectory is absent.
    MissingDocs(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Clone(message) => write!(f, "clone failed: {}", message),
            FetchFailure::MissingDocs(dir) => {
                write!(f, "documentation directory '{}' not found", dir)
            }
        }
    }
}

/// Result of fetching one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// Path to the documentation subdirectory inside the fresh clone.
    Docs(PathBuf),
    Unavailable(FetchFailure),
}

/// Clones repositories into a dedicated root, one directory per name.
pub struct RepositoryFetcher {
    git_ops: Box<dyn GitOperations>,
    clone_root: PathBuf,
}

impl RepositoryFetcher {
    /// Creates a fetcher backed by the system `git`.
    pub fn new(clone_root: PathBuf) -> Self {
        Self::with_operations(Box::new(DefaultGitOperations), clone_root)
    }

    /// Creates a fetcher with a custom `GitOperations` implementation.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(git_ops: Box<dyn GitOperations>, clone_root: PathBuf) -> Self {
        Self {
            git_ops,
            clone_root,
        }
    }

    /// Fetches `repo` and returns the location of its documentation.
    pub fn fetch(&self, repo: &RepositoryDescriptor) -> Result<Fetched> {
        info!("Fetching repository: {}", repo.name);

        let repo_path = self.clone_root.join(&repo.name);
        if repo_path.exists() {
            fs::remove_dir_all(&repo_path).map_err(|e| Error::Filesystem {
                message: format!(
                    "Failed to remove previous clone '{}': {}",
                    repo_path.display(),
                    e
                ),
            })?;
        }

        if let Err(e) = self.git_ops.clone_shallow(&repo.url, &repo_path) {
            error!("Failed to clone {}: {}", repo.name, e);
            return Ok(Fetched::Unavailable(FetchFailure::Clone(e.to_string())));
        }
        info!("Successfully cloned {}", repo.name);

        let doc_path = repo_path.join(&repo.dir);
        if !doc_path.is_dir() {
            warn!(
                "Documentation directory {} not found in {}",
                repo.dir, repo.name
            );
            return Ok(Fetched::Unavailable(FetchFailure::MissingDocs(
                repo.dir.clone(),
            )));
        }

        Ok(Fetched::Docs(doc_path))
    }
}
