//! # Workspace Manager
//!
//! A run owns three directory roots:
//!
//! - the clone root, where each repository is shallow-cloned,
//! - the source root, where normalized documentation trees are staged,
//! - the build root, whose `html/` subdirectory is the published site.
//!
//! All three are wiped and recreated by [`Workspace::reset`] at the start of
//! every run. Nothing in them survives between runs.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::defaults;
use crate::error::{Error, Result};

/// The directory roots used by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub temp_dir: PathBuf,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl Workspace {
    pub fn new(temp_dir: PathBuf, source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            temp_dir,
            source_dir,
            build_dir,
        }
    }

    /// The default `_temp`, `_source`, `_build` layout beneath `root`.
    pub fn under(root: &Path) -> Self {
        Self::new(
            root.join(defaults::TEMP_DIR),
            root.join(defaults::SOURCE_DIR),
            root.join(defaults::BUILD_DIR),
        )
    }

    /// Deletes and recreates every root.
    ///
    /// Safe to call when the directories do not exist yet. Any error here is
    /// fatal to the run.
    pub fn reset(&self) -> Result<()> {
        info!("Cleaning directories...");
        for dir in self.roots() {
            if dir.exists() {
                fs::remove_dir_all(dir).map_err(|e| workspace_error(dir, e))?;
            }
            fs::create_dir_all(dir).map_err(|e| workspace_error(dir, e))?;
        }
        Ok(())
    }

    fn roots(&self) -> [&Path; 3] {
        [&self.temp_dir, &self.source_dir, &self.build_dir]
    }

    /// Where `name` is cloned.
    pub fn clone_dir(&self, name: &str) -> PathBuf {
        self.temp_dir.join(name)
    }

    /// Root of the published site.
    pub fn html_root(&self) -> PathBuf {
        self.build_dir.join("html")
    }

    /// Where the rendered documentation of `name` is written.
    pub fn html_dir(&self, name: &str) -> PathBuf {
        self.html_root().join(name)
    }
}

fn workspace_error(path: &Path, e: std::io::Error) -> Error {
    Error::Workspace {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
