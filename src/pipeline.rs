//! # Sync and Publish
//!
//! One invocation of [`Pipeline::run`] brings the output directory up to date
//! with the upstream repository. It is meant to be started periodically by an
//! external scheduler that guarantees two runs never overlap.
//!
//! ## Stages
//!
//! 1. **Pull head**: discard local changes in the head clone and pull the
//!    tracked branch with tags. New tags are read from the pull's stderr.
//! 2. **Snapshot**: if the pull brought new commits, or `HEAD-min` is
//!    missing, rebuild the development snapshot and its archive.
//! 3. **Pull build**: same discard-then-pull in the build clone.
//! 4. **Tags**: build every new tag, one after the other, into its own
//!    folder and archive, then check the tracked branch out again.
//! 5. **Latest**: repoint `latest` at the newest new stable tag.
//! 6. **Bootstrap**: if the output directory has no stable release at all,
//!    build the newest stable tag known to the build clone.
//! 7. **Index**: rewrite `versions.json` when the set of releases changed.
//!
//! Each stage returns a `Result`; the first failure stops the run and is
//! returned to the caller. Nothing is retried; running the pipeline again is
//! the recovery mechanism.

use log::{info, warn};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::Result;
use crate::git;
use crate::publish::{self, HEAD_MIN, VERSIONS_FILE};
use crate::tags;
use crate::toolchain::Toolchain;
use crate::version;

/// State accumulated while a run progresses through its stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Version tags announced by the head pull, in discovery order.
    pub new_tags: Vec<String>,
    /// Release `latest` should point at after this run, if it changes.
    pub latest: Option<String>,
    /// Whether the head pull fetched new commits.
    pub head_updated: bool,
    /// Whether `HEAD-min` was rebuilt.
    pub snapshot_rebuilt: bool,
    /// Release built by the empty-output-directory bootstrap.
    pub bootstrapped: Option<String>,
    /// Whether `versions.json` was rewritten.
    pub index_written: bool,
}

/// The sync-and-publish workflow bound to one configuration and toolchain.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    toolchain: &'a Toolchain,
}

impl<'a> Pipeline<'a> {
    pub fn new(settings: &'a Settings, toolchain: &'a Toolchain) -> Self {
        Self {
            settings,
            toolchain,
        }
    }

    /// Run every stage in order and report what happened.
    pub fn run(&self) -> Result<RunContext> {
        info!("Starting visualizer update");
        let mut ctx = RunContext::default();

        self.pull_head(&mut ctx)?;
        if self.snapshot_needed(&ctx) {
            self.rebuild_snapshot(&mut ctx)?;
        }
        self.pull_build()?;
        self.build_new_tags(&ctx)?;
        self.link_latest(&ctx)?;
        self.bootstrap_latest(&mut ctx)?;
        self.write_versions_index(&mut ctx)?;

        info!("Visualizer update finished");
        Ok(ctx)
    }

    fn pull_head(&self, ctx: &mut RunContext) -> Result<()> {
        let head = &self.settings.layout.head;
        info!("Pulling latest changes");

        let git = self.toolchain.git();
        git.discard_changes(head)?;
        let output = git.pull(head, &self.settings.branch)?;

        let found = tags::parse_new_tags(&output.stderr);
        ctx.new_tags = found.tags;
        ctx.latest = found.latest;
        ctx.head_updated = !git::is_up_to_date(&output.stdout);

        if ctx.head_updated {
            info!("New commits found");
        } else {
            info!("Repository up-to-date");
        }
        Ok(())
    }

    fn snapshot_needed(&self, ctx: &RunContext) -> bool {
        if ctx.head_updated {
            return true;
        }
        let missing = publish::missing(&self.settings.layout.out_entry(HEAD_MIN));
        if missing {
            info!("{} is missing", HEAD_MIN);
        }
        missing
    }

    fn rebuild_snapshot(&self, ctx: &mut RunContext) -> Result<()> {
        let layout = &self.settings.layout;
        info!("Building the visualizer {}", HEAD_MIN);

        let builder = self.toolchain.builder();
        builder.install(&layout.head)?;
        let output = builder.build(&layout.head)?;
        publish::replace_snapshot(&output, &layout.out)?;
        self.toolchain.archiver().compress(&layout.out, HEAD_MIN)?;

        info!("{} version copied", HEAD_MIN);
        ctx.snapshot_rebuilt = true;
        Ok(())
    }

    fn pull_build(&self) -> Result<()> {
        let build = &self.settings.layout.build;
        let git = self.toolchain.git();
        git.discard_changes(build)?;
        git.pull(build, &self.settings.branch)?;
        Ok(())
    }

    fn build_new_tags(&self, ctx: &RunContext) -> Result<()> {
        if ctx.new_tags.is_empty() {
            info!("No new tag");
            return Ok(());
        }

        info!("Building {} new tag(s)", ctx.new_tags.len());
        // The build clone is a single checkout: one tag at a time.
        for tag in &ctx.new_tags {
            self.build_release(tag)?;
        }
        self.checkout_branch()
    }

    /// Check out, build and package one release tag in the build clone.
    fn build_release(&self, tag: &str) -> Result<PathBuf> {
        let layout = &self.settings.layout;
        let git = self.toolchain.git();

        git.discard_changes(&layout.build)?;
        git.checkout_tag(&layout.build, tag)?;
        info!("Checked out {}", tag);

        info!("Building the visualizer {}", tag);
        let builder = self.toolchain.builder();
        builder.install(&layout.build)?;
        let output = builder.build(&layout.build)?;
        let published = publish::publish_build(&output, &layout.out, tag)?;
        self.toolchain.archiver().compress(&layout.out, tag)?;

        info!("{} version copied", tag);
        Ok(published)
    }

    fn checkout_branch(&self) -> Result<()> {
        self.toolchain
            .git()
            .checkout(&self.settings.layout.build, &self.settings.branch)
    }

    fn link_latest(&self, ctx: &RunContext) -> Result<()> {
        match &ctx.latest {
            Some(latest) => publish::link_latest(&self.settings.layout.out, latest),
            None => Ok(()),
        }
    }

    /// One-time path for a fresh output directory: make sure `latest` exists.
    fn bootstrap_latest(&self, ctx: &mut RunContext) -> Result<()> {
        let layout = &self.settings.layout;
        if publish::has_stable_release(&layout.out)? {
            return Ok(());
        }

        info!("No release found, looking for the newest stable tag");
        let all_tags = self.toolchain.git().list_tags(&layout.build)?;
        let Some(tag) = version::find_latest_stable(&all_tags) else {
            warn!("No stable release tag exists in {}", layout.build.display());
            return Ok(());
        };

        self.build_release(&tag)?;
        self.checkout_branch()?;
        publish::link_latest(&layout.out, &tag)?;

        ctx.latest = Some(tag.clone());
        ctx.bootstrapped = Some(tag);
        Ok(())
    }

    fn write_versions_index(&self, ctx: &mut RunContext) -> Result<()> {
        let out = &self.settings.layout.out;
        let changed = !ctx.new_tags.is_empty() || ctx.bootstrapped.is_some();
        if !changed && !publish::missing(&out.join(VERSIONS_FILE)) {
            return Ok(());
        }

        let items = publish::write_versions_index(out)?;
        info!("Wrote {} with {} entries", VERSIONS_FILE, items.len());
        ctx.index_written = true;
        Ok(())
    }
}
