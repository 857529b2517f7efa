//! Git operations on the local clones, using the system `git` command.
//!
//! The system binary automatically picks up SSH keys, credential helpers and
//! anything else configured in `~/.gitconfig`, which matters for the single
//! network-facing call (cloning the upstream into the head location).

use std::path::Path;

use crate::error::Result;
use crate::process::{self, CommandOutput};

/// Markers printed by `git pull` when no new commits were fetched. Older
/// git versions hyphenate the phrase.
const UP_TO_DATE_MARKERS: [&str; 2] = ["Already up to date", "Already up-to-date"];

/// Clone `source` into `cwd/name`.
///
/// `source` may be a URL or a path to another local clone.
pub fn clone(source: &str, name: &str, cwd: &Path) -> Result<()> {
    process::run("git", &["clone", source, name], cwd)?;
    Ok(())
}

/// Throw away local modifications to tracked files.
pub fn discard_changes(repo: &Path) -> Result<()> {
    process::run("git", &["reset", "--hard", "HEAD"], repo)?;
    Ok(())
}

/// Pull `branch` from `origin`, fetching tags as well.
///
/// The returned output is what callers inspect for new commits (stdout) and
/// new tags (stderr).
pub fn pull(repo: &Path, branch: &str) -> Result<CommandOutput> {
    process::run(
        "git",
        &["pull", "--no-stat", "--tags", "origin", branch],
        repo,
    )
}

/// Check out a branch or any other reference.
pub fn checkout(repo: &Path, reference: &str) -> Result<()> {
    process::run("git", &["checkout", reference], repo)?;
    Ok(())
}

/// Check out a release tag.
pub fn checkout_tag(repo: &Path, tag: &str) -> Result<()> {
    checkout(repo, &format!("tags/{}", tag))
}

/// List every tag known to the clone.
pub fn list_tags(repo: &Path) -> Result<Vec<String>> {
    let output = process::run("git", &["tag", "--list"], repo)?;
    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Whether the stdout of a pull says nothing new was fetched.
pub fn is_up_to_date(pull_stdout: &str) -> bool {
    UP_TO_DATE_MARKERS
        .iter()
        .any(|marker| pull_stdout.contains(marker))
}

/// Whether `dir` exists and contains a `.git` entry.
pub fn is_checkout(dir: &Path) -> bool {
    dir.exists() && dir.join(".git").exists()
}
