//! # Merge Command Implementation
//!
//! `merge <from> <to>` replaces release `from` with symlinks to release `to`
//! (directory and archive). Use it to retire a broken or superseded release
//! without breaking URLs that reference it.
//!
//! The request is refused, with nothing changed on disk, when either version
//! is invalid or not published, when `from` was already merged, or when
//! `from` is not strictly older than `to`.

use anyhow::Result;
use clap::Args;

use visualizer_publish::config;
use visualizer_publish::error::Error;
use visualizer_publish::merge;

use super::Context;

/// Merge a release into another one
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Release to retire (for example v2.41.0)
    pub from: String,

    /// Newer release that `from` will alias
    pub to: String,
}

/// Execute the `merge` command.
pub fn execute(args: MergeArgs, ctx: &Context) -> Result<()> {
    let settings = config::from_file(&ctx.config)?;
    let out = &settings.layout.out;

    match merge::merge(out, &args.from, &args.to) {
        Ok(()) => {
            println!(
                "{} {} now points to {}",
                ctx.output.link(),
                args.from,
                args.to
            );
            Ok(())
        }
        Err(Error::MergeRejected(rejection)) => {
            anyhow::bail!("{} {}", ctx.output.fail(), rejection)
        }
        Err(e) => Err(e.into()),
    }
}
