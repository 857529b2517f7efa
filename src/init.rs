//! # Repository Initializer
//!
//! Prepares the working directory and the output directory so that the
//! sync pipeline can run. Every step checks before it acts, so running the
//! initializer again is harmless:
//!
//! 1. create the `repo` and `out` directories;
//! 2. clone the upstream into `repo/head`, and `repo/head` into `repo/build`
//!    (a local clone, no network involved);
//! 3. create the fixed symlinks of the output directory;
//! 4. write the static files;
//! 5. backfill archives for published versions that have none.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::archive_name;
use crate::config::{Layout, Settings};
use crate::error::Result;
use crate::git;
use crate::publish::{self, HEAD, HEAD_MIN};
use crate::toolchain::Toolchain;

/// Files copied verbatim into the output directory.
pub const STATIC_FILES: [(&str, &str); 2] = [
    ("index.html", include_str!("../static/index.html")),
    ("robots.txt", include_str!("../static/robots.txt")),
];

/// Symlinks every output directory carries, as `(name, target)` pairs.
pub fn managed_symlinks(layout: &Layout) -> Vec<(&'static str, PathBuf)> {
    let head_src = layout.head.join("src");
    let snapshot = layout.out.join(HEAD_MIN);
    vec![
        (HEAD, head_src.clone()),
        ("src", head_src.clone()),
        ("head", head_src),
        ("testcase", layout.head.join("testcase")),
        ("doc", layout.head.join("doc")),
        ("min", snapshot.clone()),
        ("build", snapshot),
    ]
}

/// What one initializer run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created_dirs: Vec<PathBuf>,
    pub cloned: Vec<String>,
    pub links_created: Vec<String>,
    pub static_files: Vec<String>,
    pub archives_created: Vec<String>,
}

/// Idempotent setup bound to one configuration and toolchain.
pub struct Initializer<'a> {
    settings: &'a Settings,
    toolchain: &'a Toolchain,
}

impl<'a> Initializer<'a> {
    pub fn new(settings: &'a Settings, toolchain: &'a Toolchain) -> Self {
        Self {
            settings,
            toolchain,
        }
    }

    pub fn run(&self) -> Result<InitReport> {
        let mut report = InitReport::default();

        info!("Checking main directories");
        self.ensure_directories(&mut report)?;

        info!("Checking visualizer clones");
        self.ensure_clones(&mut report)?;

        info!("Checking symbolic links");
        self.ensure_symlinks(&mut report)?;

        info!("Copying static files");
        self.copy_static_files(&mut report)?;

        info!("Checking archives");
        self.backfill_archives(&mut report)?;

        Ok(report)
    }

    fn ensure_directories(&self, report: &mut InitReport) -> Result<()> {
        let layout = &self.settings.layout;
        for dir in [&layout.repo, &layout.out] {
            if publish::missing(dir) {
                fs::create_dir_all(dir)?;
                info!("{} created", dir.display());
                report.created_dirs.push(dir.clone());
            }
        }
        Ok(())
    }

    fn ensure_clones(&self, report: &mut InitReport) -> Result<()> {
        let layout = &self.settings.layout;
        let git_ops = self.toolchain.git();

        if !git::is_checkout(&layout.head) {
            git_ops.clone_repo(&self.settings.upstream, "head", &layout.repo)?;
            info!("Cloned visualizer head");
            report.cloned.push("head".to_string());
        }

        if !git::is_checkout(&layout.build) {
            git_ops.clone_repo("head", "build", &layout.repo)?;
            info!("Cloned visualizer build");
            report.cloned.push("build".to_string());
        }
        Ok(())
    }

    fn ensure_symlinks(&self, report: &mut InitReport) -> Result<()> {
        let layout = &self.settings.layout;
        for (name, target) in managed_symlinks(layout) {
            if publish::symlink_if_missing(&target, &layout.out_entry(name))? {
                info!("Linked {} -> {}", name, target.display());
                report.links_created.push(name.to_string());
            }
        }
        Ok(())
    }

    fn copy_static_files(&self, report: &mut InitReport) -> Result<()> {
        for (name, content) in STATIC_FILES {
            fs::write(self.settings.layout.out_entry(name), content)?;
            report.static_files.push(name.to_string());
        }
        Ok(())
    }

    /// Create the archive of every published folder that lacks one.
    ///
    /// Real folders are compressed first; a version that is itself a
    /// symlink (a merged release) then gets an archive symlink pointing at
    /// its target's archive.
    fn backfill_archives(&self, report: &mut InitReport) -> Result<()> {
        let out = &self.settings.layout.out;

        let mut names = publish::version_entries(out)?;
        if out.join(HEAD_MIN).is_dir() {
            names.push(HEAD_MIN.to_string());
        }
        names.sort();

        let (aliases, folders): (Vec<String>, Vec<String>) = names
            .into_iter()
            .filter(|name| publish::missing(&out.join(archive_name(name))))
            .partition(|name| publish::is_symlink(&out.join(name)));

        for name in folders {
            self.toolchain.archiver().compress(out, &name)?;
            info!("Created {}", archive_name(&name));
            report.archives_created.push(archive_name(&name));
        }

        for name in aliases {
            let target = alias_target(out, &name)?;
            let archive = publish::archive_path(&target);
            std::os::unix::fs::symlink(&archive, out.join(archive_name(&name)))?;
            info!("Linked {} -> {}", archive_name(&name), archive.display());
            report.archives_created.push(archive_name(&name));
        }
        Ok(())
    }
}

/// Resolve the folder a version symlink points at, relative to `out`.
fn alias_target(out: &Path, name: &str) -> Result<PathBuf> {
    let target = fs::read_link(out.join(name))?;
    Ok(if target.is_absolute() {
        target
    } else {
        out.join(target)
    })
}
