//! # Pipeline Orchestrator
//!
//! Sequences a full, clean build of the aggregated site:
//!
//! 1.  **Reset** the workspace roots.
//! 2.  For each configured repository, in order:
//!     - **Fetch** it. An unavailable repository is recorded and skipped.
//!     - For Sphinx repositories, **normalize** the documentation and
//!       **build** it into `html/{name}`.
//!     - Any other documentation type is logged as unsupported and skipped.
//! 3.  **Index**: write the landing page, even when nothing was built.
//!
//! Per-repository failures never abort the run. They are collected as
//! [`RepoOutcome`] records in the returned [`RunSummary`]; the run as a whole
//! only counts as failed when no repository was built.

use std::fmt;

use log::{error, info, warn};

use crate::builder::SiteBuilder;
use crate::config::{Config, DocType, RepositoryDescriptor};
use crate::error::Result;
use crate::index;
use crate::normalize;
use crate::repository::{FetchFailure, Fetched, RepositoryFetcher};
use crate::workspace::Workspace;

/// What happened to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoStatus {
    Built,
    FetchFailed(FetchFailure),
    Unsupported,
    NormalizeFailed(String),
    BuildFailed(String),
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoStatus::Built => f.write_str("built"),
            RepoStatus::FetchFailed(failure) => write!(f, "fetch failed: {}", failure),
            RepoStatus::Unsupported => f.write_str("unsupported documentation type"),
            RepoStatus::NormalizeFailed(message) => write!(f, "staging failed: {}", message),
            RepoStatus::BuildFailed(message) => write!(f, "build failed: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOutcome {
    pub name: String,
    pub doc_type: DocType,
    pub status: RepoStatus,
}

impl RepoOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == RepoStatus::Built
    }
}

/// Outcomes of one run, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<RepoOutcome>,
}

impl RunSummary {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Repositories that were not built, including unsupported ones.
    pub fn failures(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// A run succeeds when at least one repository was built.
    pub fn is_success(&self) -> bool {
        self.success_count() > 0
    }
}

/// Owns the workspace and collaborators for one run.
pub struct Pipeline {
    config: Config,
    workspace: Workspace,
    fetcher: RepositoryFetcher,
    builder: SiteBuilder,
}

impl Pipeline {
    /// Creates a pipeline that clones with the system `git`.
    pub fn new(config: Config, workspace: Workspace, builder: SiteBuilder) -> Self {
        let fetcher = RepositoryFetcher::new(workspace.temp_dir.clone());
        Self::with_fetcher(config, workspace, fetcher, builder)
    }

    pub fn with_fetcher(
        config: Config,
        workspace: Workspace,
        fetcher: RepositoryFetcher,
        builder: SiteBuilder,
    ) -> Self {
        Self {
            config,
            workspace,
            fetcher,
            builder,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Runs the whole pipeline.
    ///
    /// Returns `Err` only for workspace or landing-page failures.
    pub fn run(&self) -> Result<RunSummary> {
        info!("Starting documentation build process");

        self.workspace.reset()?;

        let mut summary = RunSummary::default();
        for repo in &self.config.repos {
            let status = self.process(repo)?;
            summary.outcomes.push(RepoOutcome {
                name: repo.name.clone(),
                doc_type: repo.doc_type.clone(),
                status,
            });
        }

        index::write_index(&self.workspace.html_root(), &self.config.repos)?;

        report(&summary);
        Ok(summary)
    }

    fn process(&self, repo: &RepositoryDescriptor) -> Result<RepoStatus> {
        info!("Processing {} ({})", repo.name, repo.doc_type);

        let doc_path = match self.fetcher.fetch(repo)? {
            Fetched::Docs(path) => path,
            Fetched::Unavailable(failure) => {
                error!("Failed to fetch {}", repo.name);
                return Ok(RepoStatus::FetchFailed(failure));
            }
        };

        if repo.doc_type != DocType::Sphinx {
            warn!("Unsupported documentation type: {}", repo.doc_type);
            return Ok(RepoStatus::Unsupported);
        }

        let source_path =
            match normalize::normalize(&doc_path, &self.workspace.source_dir, &repo.name) {
                Ok(path) => path,
                Err(e) => {
                    error!("Failed to stage documentation for {}: {}", repo.name, e);
                    return Ok(RepoStatus::NormalizeFailed(e.to_string()));
                }
            };

        let destination = self.workspace.html_dir(&repo.name);
        match self.builder.build(&source_path, &repo.name, &destination) {
            Ok(()) => Ok(RepoStatus::Built),
            Err(e) => {
                error!("Error building documentation for {}: {}", repo.name, e);
                Ok(RepoStatus::BuildFailed(e.to_string()))
            }
        }
    }
}

fn report(summary: &RunSummary) {
    info!(
        "Build complete: {}/{} repositories processed successfully",
        summary.success_count(),
        summary.total_count()
    );
    for outcome in summary.failures() {
        warn!("  {}: {}", outcome.name, outcome.status);
    }
    if !summary.is_success() {
        error!("No documentation was built successfully");
    }
}
