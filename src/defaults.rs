//! Default values for docs-hub.
//!
//! This module provides the hardcoded names used across the pipeline so the
//! binary and the library agree on them.

/// Configuration file read when `--config` is not given.
pub const CONFIG_FILE: &str = "repos.yaml";

/// Root of the shallow clones.
pub const TEMP_DIR: &str = "_temp";

/// Root of the normalized documentation sources.
pub const SOURCE_DIR: &str = "_source";

/// Root of the rendered output; HTML lands in `html/` beneath it.
pub const BUILD_DIR: &str = "_build";

/// Documentation subdirectory assumed when an entry omits `dir`.
pub const DOC_DIR: &str = "docs";

/// Documentation compiler invoked when `--sphinx-build` is not given.
pub const SPHINX_BUILD: &str = "sphinx-build";
