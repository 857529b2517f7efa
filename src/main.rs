//! # Visualizer Publish CLI
//!
//! Binary entry point for the `visualizer-publish` command-line tool.
//!
//! Its responsibilities are parsing the command line with `clap`, running the
//! selected command and turning errors into a non-zero exit status. The
//! publishing logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
