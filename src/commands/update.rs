//! # Update Command Implementation
//!
//! Runs the sync-and-publish pipeline once. This is also what runs when no
//! subcommand is given, so a crontab entry only needs the binary and,
//! optionally, `--config`.
//!
//! Any failing external command aborts the run with a non-zero exit status.
//! Whatever was published before the failure stays in place; the next run
//! picks up from the current state of the clones.

use anyhow::{Context as _, Result};
use clap::Args;

use visualizer_publish::config;
use visualizer_publish::pipeline::{Pipeline, RunContext};
use visualizer_publish::publish::{HEAD_MIN, LATEST, VERSIONS_FILE};
use visualizer_publish::toolchain::Toolchain;

use super::Context;

/// Pull upstream changes and publish new builds
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {}

/// Execute the `update` command.
pub fn execute(_args: UpdateArgs, ctx: &Context) -> Result<()> {
    let settings = config::from_file(&ctx.config)?;
    let toolchain = Toolchain::new(settings.package_manager);

    let summary = Pipeline::new(&settings, &toolchain)
        .run()
        .context("Visualizer update failed")?;
    print_summary(&summary, ctx);
    Ok(())
}

fn print_summary(summary: &RunContext, ctx: &Context) {
    let output = &ctx.output;

    if summary.snapshot_rebuilt {
        println!("{} Rebuilt {}", output.package(), HEAD_MIN);
    }
    for tag in summary.new_tags.iter().chain(summary.bootstrapped.iter()) {
        println!("{} Published {}", output.package(), tag);
    }
    if let Some(latest) = &summary.latest {
        println!("{} {} -> {}", output.link(), LATEST, latest);
    }
    if summary.index_written {
        println!("{} Updated {}", output.ok(), VERSIONS_FILE);
    }
    if !summary.snapshot_rebuilt && summary.new_tags.is_empty() && summary.bootstrapped.is_none() {
        println!("{} Nothing new to publish", output.ok());
    }
}
