//! # Content Normalizer
//!
//! Stages a repository's documentation under the source root so it can be
//! built with a uniform configuration.
//!
//! ## Process
//!
//! 1.  **Markup files** (`.rst`, `.md`) at the top level are decoded as UTF-8,
//!     replacing undecodable bytes, and passed through [`strip_links`].
//! 2.  **Plain-text files** (`.txt`) at the top level are copied unchanged.
//! 3.  **Subdirectories** are copied recursively, byte-for-byte, except for
//!     the names in [`EXCLUDED_DIRS`].
//! 4.  **`conf.py`** is then written at the destination root, replacing any
//!     copy that came from the repository.
//!
//! Other top-level files are left behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Links to other products' documentation removed from every markup file.
pub const STRIPPED_LINKS: &[&str] = &[
    "https://clouddocs.f5.com/training/community/rseries-training/html/",
    "https://clouddocs.f5.com/training/community/velos-training/html/",
];

/// Top-level directory names never copied: Sphinx's build output and Python
/// bytecode caches.
pub const EXCLUDED_DIRS: &[&str] = &["_build", "__pycache__"];

const MARKUP_EXTENSIONS: &[&str] = &["rst", "md"];
const PLAIN_EXTENSIONS: &[&str] = &["txt"];

/// Removes every occurrence of every [`STRIPPED_LINKS`] entry.
///
/// Removal is repeated until nothing changes, so a link that only appears
/// after another one is cut out of the middle of it is removed as well.
pub fn strip_links(content: &str) -> String {
    let mut stripped = content.to_string();
    loop {
        let before = stripped.len();
        for link in STRIPPED_LINKS {
            if stripped.contains(link) {
                stripped = stripped.replace(link, "");
            }
        }
        if stripped.len() == before {
            return stripped;
        }
    }
}

/// Copies the documentation at `doc_path` into `target_root/{repo_name}` and
/// writes its `conf.py`. Returns the staged directory.
pub fn normalize(doc_path: &Path, target_root: &Path, repo_name: &str) -> Result<PathBuf> {
    info!("Processing Sphinx documentation for {}", repo_name);

    let target_path = target_root.join(repo_name);
    fs::create_dir_all(&target_path).map_err(|e| fs_error("create directory", &target_path, e))?;

    for entry in fs::read_dir(doc_path).map_err(|e| fs_error("read directory", doc_path, e))? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let dest = target_path.join(&name);

        if path.is_file() {
            if has_extension(&path, MARKUP_EXTENSIONS) {
                let bytes = fs::read(&path).map_err(|e| fs_error("read", &path, e))?;
                let content = String::from_utf8_lossy(&bytes);
                fs::write(&dest, strip_links(&content)).map_err(|e| fs_error("write", &dest, e))?;
            } else if has_extension(&path, PLAIN_EXTENSIONS) {
                copy_file(&path, &dest)?;
            } else {
                debug!("Skipping {}", path.display());
            }
        } else if path.is_dir() {
            if name.to_str().is_some_and(|n| EXCLUDED_DIRS.contains(&n)) {
                debug!("Skipping excluded directory {}", path.display());
                continue;
            }
            copy_tree(&path, &dest)?;
        }
    }

    write_conf(&target_path.join("conf.py"), repo_name)?;

    Ok(target_path)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Recursively copies `src` into `dst`, overwriting existing files.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("Failed to walk '{}': {}", src.display(), e),
        })?;
        // strip_prefix cannot fail for entries yielded under src
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let dest = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| fs_error("create directory", &dest, e))?;
        } else {
            copy_file(entry.path(), &dest)?;
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to copy '{}' to '{}': {}",
            src.display(),
            dst.display(),
            e
        ),
    })?;
    Ok(())
}

fn fs_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::Filesystem {
        message: format!("Failed to {} '{}': {}", action, path.display(), e),
    }
}

/// Writes the Sphinx configuration used for every repository.
pub fn write_conf(conf_path: &Path, repo_name: &str) -> Result<()> {
    info!("Creating basic conf.py for {}", repo_name);
    fs::write(conf_path, render_conf(repo_name)).map_err(|e| fs_error("write", conf_path, e))
}

/// Renders `conf.py` for `repo_name`.
pub fn render_conf(repo_name: &str) -> String {
    let literal = repo_name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        r#"# Configuration file for {literal}
project = '{literal}'

extensions = [
    'sphinx.ext.autodoc',
    'sphinx.ext.viewcode',
    'sphinx.ext.todo',
]

templates_path = ['_templates']
exclude_patterns = ['_build', 'Thumbs.db', '.DS_Store']

html_theme = 'shibuya'
html_title = project
html_short_title = project
html_show_sourcelink = False
html_show_sphinx = False
html_show_copyright = True

html_static_path = ['_static']
"#
    )
}
