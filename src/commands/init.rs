//! # Init Command Implementation
//!
//! Prepares a host for publishing: creates the working and output
//! directories, clones the visualizer twice (`head` from upstream, `build`
//! from `head`), creates the fixed symlinks, writes the static files and
//! backfills missing archives.
//!
//! Every step is skipped when already done, so the command can be re-run at
//! any time, for example after restoring an output directory from a backup.

use anyhow::{Context as _, Result};
use clap::Args;

use visualizer_publish::config;
use visualizer_publish::init::Initializer;
use visualizer_publish::toolchain::Toolchain;

use super::Context;

/// Prepare clones, symlinks and static files
#[derive(Args, Debug, Default)]
pub struct InitArgs {}

/// Execute the `init` command.
pub fn execute(_args: InitArgs, ctx: &Context) -> Result<()> {
    let settings = config::from_file(&ctx.config)?;
    let toolchain = Toolchain::new(settings.package_manager);

    let report = Initializer::new(&settings, &toolchain)
        .run()
        .context("Initialization failed")?;

    let output = &ctx.output;
    for dir in &report.created_dirs {
        println!("{} Created {}", output.ok(), dir.display());
    }
    for clone in &report.cloned {
        println!("{} Cloned {}", output.ok(), clone);
    }
    for link in &report.links_created {
        println!("{} Linked {}", output.link(), link);
    }
    for archive in &report.archives_created {
        println!("{} Created {}", output.package(), archive);
    }
    println!(
        "{} Output directory ready: {}",
        output.ok(),
        settings.layout.out.display()
    );
    Ok(())
}
