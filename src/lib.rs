//! # docs-hub
//!
//! This library aggregates Sphinx documentation from several git repositories
//! into one static site. It is used by the `docs-hub` command-line tool, which
//! is a thin wrapper around [`pipeline::Pipeline`].
//!
//! ## Quick Example
//!
//! ```
//! use docs_hub::config;
//!
//! let config = config::parse(r#"
//! repos:
//!   - name: velos
//!     url: https://github.com/example/velos-docs.git
//! "#).unwrap();
//!
//! assert_eq!(config.repos[0].dir, "docs");
//! ```
//!
//! ## Execution Flow
//!
//! A run is a full clean rebuild, processed one repository at a time:
//!
//! 1.  **Reset** (`workspace`): the clone, source and build roots are emptied.
//! 2.  **Fetch** (`repository`, `git`): each repository is shallow-cloned and
//!     its documentation subdirectory located.
//! 3.  **Normalize** (`normalize`): documentation is staged with unwanted
//!     links stripped and a generated `conf.py`.
//! 4.  **Build** (`builder`): `sphinx-build` renders each staged tree.
//! 5.  **Index** (`index`): a landing page links every configured repository.
//!
//! Failures of a single repository are recorded and the run moves on; the
//! run fails only when nothing was built.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod index;
pub mod normalize;
pub mod pipeline;
pub mod repository;
pub mod workspace;
