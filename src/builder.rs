//! # Site Builder
//!
//! Runs the documentation compiler for one staged repository. The compiler is
//! invoked as
//!
//! ```text
//! sphinx-build -b html -E -q <source> <destination>
//! ```
//!
//! requesting HTML output, a fresh environment and quiet console output.
//! Standard error is captured and carried in the returned error so the
//! pipeline can log it.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::info;

use crate::defaults;
use crate::error::{Error, Result};

/// Invokes an external Sphinx-compatible compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBuilder {
    program: String,
}

impl SiteBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Renders `source` into `destination`, creating it if needed.
    pub fn build(&self, source: &Path, repo_name: &str, destination: &Path) -> Result<()> {
        info!("Building Sphinx documentation for {}", repo_name);

        fs::create_dir_all(destination).map_err(|e| Error::Filesystem {
            message: format!(
                "Failed to create directory '{}': {}",
                destination.display(),
                e
            ),
        })?;

        let output = Command::new(&self.program)
            .args(["-b", "html", "-E", "-q"])
            .arg(source)
            .arg(destination)
            .output()
            .map_err(|e| Error::ToolNotFound {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::SphinxBuild {
                repo: repo_name.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Successfully built documentation for {}", repo_name);
        Ok(())
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new(defaults::SPHINX_BUILD)
    }
}
