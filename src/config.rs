//! # Configuration Loading
//!
//! The operator describes where things live in a small JSON file (by default
//! `config.json` in the working directory):
//!
//! ```json
//! {
//!     "repo": "./visualizer",
//!     "out": "/var/www/cdn/visualizer"
//! }
//! ```
//!
//! - `repo` is the working directory holding the `head` and `build` clones.
//! - `out` is the publish target served by the CDN.
//!
//! Optional keys override the upstream location (`upstream`), the tracked
//! branch (`branch`) and the build tool (`package_manager`, `npm` or `yarn`).
//!
//! Relative paths are resolved against the directory containing the config
//! file, so a scheduled job does not depend on its working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Upstream repository cloned into the head location.
pub const DEFAULT_UPSTREAM: &str = "https://github.com/NPellet/visualizer.git";

/// Branch tracked by the head clone and restored in the build clone.
pub const DEFAULT_BRANCH: &str = "gh-pages";

/// The file name looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Raw contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub repo: PathBuf,
    pub out: PathBuf,
    #[serde(default = "default_upstream")]
    pub upstream: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub package_manager: PackageManager,
}

fn default_upstream() -> String {
    DEFAULT_UPSTREAM.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// The JavaScript package manager used to install and build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    /// Name of the executable to spawn.
    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }
}

/// Absolute locations of every directory the tool works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Working directory root containing both clones.
    pub repo: PathBuf,
    /// Clone tracking the default branch, built into `HEAD-min`.
    pub head: PathBuf,
    /// Clone used to check out and build release tags.
    pub build: PathBuf,
    /// Publish target.
    pub out: PathBuf,
}

impl Layout {
    pub fn new(repo: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        let repo = repo.into();
        Self {
            head: repo.join("head"),
            build: repo.join("build"),
            repo,
            out: out.into(),
        }
    }

    /// Path of an entry directly under the output directory.
    pub fn out_entry(&self, name: &str) -> PathBuf {
        self.out.join(name)
    }
}

/// Configuration with every path resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub layout: Layout,
    pub upstream: String,
    pub branch: String,
    pub package_manager: PackageManager,
}

/// Parse configuration file contents.
pub fn parse(json_content: &str) -> std::result::Result<Config, serde_json::Error> {
    serde_json::from_str(json_content)
}

/// Load and resolve the configuration file at `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigMissing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let config = parse(&content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    resolve(config, base_dir)
}

/// Turn a parsed `Config` into `Settings`, anchoring relative paths at `base_dir`.
pub fn resolve(config: Config, base_dir: &Path) -> Result<Settings> {
    let repo = std::path::absolute(base_dir.join(&config.repo))?;
    let out = std::path::absolute(base_dir.join(&config.out))?;

    Ok(Settings {
        layout: Layout::new(repo, out),
        upstream: config.upstream,
        branch: config.branch,
        package_manager: config.package_manager,
    })
}
