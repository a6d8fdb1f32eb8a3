//! CLI argument parsing and pipeline dispatch

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use docs_hub::builder::SiteBuilder;
use docs_hub::config;
use docs_hub::defaults;
use docs_hub::pipeline::Pipeline;
use docs_hub::workspace::Workspace;

/// docs-hub - Build one documentation site from several repositories
#[derive(Parser, Debug)]
#[command(name = "docs-hub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the repository list
    #[arg(short, long, value_name = "PATH", env = "DOCS_HUB_CONFIG", default_value = defaults::CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the _temp, _source and _build roots (defaults to current directory)
    #[arg(long, value_name = "PATH", env = "DOCS_HUB_ROOT")]
    root: Option<PathBuf>,

    /// Documentation compiler to invoke
    #[arg(long, value_name = "PROGRAM", env = "DOCS_HUB_SPHINX_BUILD", default_value = defaults::SPHINX_BUILD)]
    sphinx_build: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Run the pipeline and map its summary to the process exit status
    pub fn execute(self) -> Result<ExitCode> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_timestamp_secs()
        .init();

        if !self.config.exists() {
            anyhow::bail!("Configuration file not found: {}", self.config.display());
        }
        let config = config::from_file(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))?;

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let pipeline = Pipeline::new(
            config,
            Workspace::under(&root),
            SiteBuilder::new(self.sphinx_build),
        );
        let summary = pipeline.run()?;

        if summary.is_success() {
            info!("Site written to {}", pipeline.workspace().html_root().display());
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}
