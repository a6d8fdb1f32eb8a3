//! # docs-hub CLI
//!
//! Binary entry point for the `docs-hub` command-line tool. It parses the
//! arguments, sets up logging and runs the pipeline from the library crate.
//!
//! The process exits with status 0 when at least one repository was built and
//! 1 otherwise, including when the configuration cannot be loaded.

mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
