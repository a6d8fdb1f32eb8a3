//! # Error Handling
//!
//! This module defines the centralized error type for `docs-hub`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! the pipeline can run into, each variant carrying enough context to produce
//! a useful log line.
//!
//! ## Fatal vs. recoverable
//!
//! Not every error ends the run. The pipeline treats the following as
//! per-repository failures that are logged and recorded in the run summary:
//!
//! - `GitClone`: the repository could not be cloned.
//! - `SphinxBuild` / `ToolNotFound`: the documentation compiler failed or is
//!   missing.
//! - `Filesystem`: the documentation tree could not be copied.
//!
//! Configuration, workspace and index errors are propagated to the binary and
//! end the run with a non-zero exit status.

use thiserror::Error;

/// Main error type for docs-hub operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repository list could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The repository list parsed but describes an invalid run.
    #[error("Configuration validation error: {message}")]
    ConfigValidation { message: String },

    /// A shallow clone failed.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// One of the workspace roots could not be reset.
    #[error("Workspace error at {path}: {message}")]
    Workspace { path: String, message: String },

    /// Copying or writing documentation sources failed.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The documentation compiler exited with a non-zero status.
    #[error("Sphinx build failed for {repo} ({status}): {stderr}")]
    SphinxBuild {
        repo: String,
        status: String,
        stderr: String,
    },

    /// An external tool could not be started.
    #[error("Tool not available: {tool} - {message}")]
    ToolNotFound { tool: String, message: String },

    /// The landing page template failed to render.
    #[error("Template rendering error: {0}")]
    Template(#[from] minijinja::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
