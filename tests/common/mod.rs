//! Shared test utilities for CLI end-to-end tests.
//!
//! This module provides fixtures for building throwaway git repositories and
//! a fake `sphinx-build`, so the whole pipeline can run without network
//! access or a Python toolchain.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     if should_skip_git_tests() {
//!         return;
//!     }
//!     let fixture = TestFixture::new();
//!     let url = fixture.git_repo("velos", &[("docs/index.rst", "Hello")]);
//!     // ... write a config pointing at `url` and run the binary
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::should_skip_git_tests;
    pub use super::TestFixture;
}

/// Check if tests that need the system `git` should be skipped.
///
/// Returns `true` if `SKIP_GIT_TESTS` is set or `git` cannot be run.
pub fn should_skip_git_tests() -> bool {
    if env::var("SKIP_GIT_TESTS").is_ok() {
        return true;
    }
    !Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// A temporary directory holding a config, source repositories and tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `repos.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("repos.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the rendered site.
    pub fn html_root(&self) -> PathBuf {
        self.path().join("_build").join("html")
    }

    /// Create a committed git repository under `remotes/{name}` and return a
    /// `file://` URL for it.
    pub fn git_repo(&self, name: &str, files: &[(&str, &str)]) -> String {
        let repo = self.path().join("remotes").join(name);
        std::fs::create_dir_all(&repo).expect("Failed to create repo directory");
        for (path, content) in files {
            let file = repo.join(path);
            std::fs::create_dir_all(file.parent().unwrap()).unwrap();
            std::fs::write(file, content).expect("Failed to write repo file");
        }

        git(&repo, &["init", "--quiet"]);
        git(&repo, &["add", "--all"]);
        git(
            &repo,
            &[
                "-c",
                "user.name=Docs Hub Tests",
                "-c",
                "user.email=tests@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "-m",
                "docs",
            ],
        );

        format!("file://{}", repo.display())
    }

    /// A `file://` URL that does not point at any repository.
    pub fn unreachable_url(&self) -> String {
        format!("file://{}", self.path().join("remotes").join("missing").display())
    }

    /// Install a fake `sphinx-build` that writes an `index.html` naming the
    /// source directory into the output directory. Returns its path.
    #[cfg(unix)]
    pub fn fake_sphinx_build(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("bin").join("sphinx-build");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"#!/bin/sh
for arg; do src="$out"; out="$arg"; done
test -f "$src/conf.py" || { echo "conf.py missing in $src" >&2; exit 2; }
echo "<html>$src</html>" > "$out/index.html"
"#,
        )
        .expect("Failed to write fake sphinx-build");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}
