//! Shared test utilities for the CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config().with_release("v1.0.0");
//!     fixture.command().arg("merge").arg("v1.0.0").arg("v1.1.0").assert().failure();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{read_index, TestFixture};
}

/// Minimal configuration: clones under `repo/`, publishing into `out/`.
pub const MINIMAL_CONFIG: &str = r#"{"repo": "repo", "out": "out"}"#;

/// A temporary working area with a `config.json` and an output directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the minimal `config.json`.
    pub fn with_config(self) -> Self {
        self.with_config_content(MINIMAL_CONFIG)
    }

    /// Write `config.json` with the given content.
    pub fn with_config_content(self, content: &str) -> Self {
        self.temp_dir
            .child("config.json")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Publish a fake release folder and archive under `out/`.
    pub fn with_release(self, name: &str) -> Self {
        self.temp_dir
            .child(format!("out/{}/index.html", name))
            .write_str(name)
            .expect("Failed to write release");
        self.temp_dir
            .child(format!("out/{}.tar.gz", name))
            .write_str(name)
            .expect("Failed to write archive");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the output directory.
    pub fn out(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("visualizer-publish");
        cmd.current_dir(self.path())
            .env_remove("VISUALIZER_PUBLISH_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Create an upstream git repository on branch `gh-pages` with one commit.
    pub fn init_upstream(&self) -> PathBuf {
        let upstream = self.path().join("upstream");
        std::fs::create_dir_all(upstream.join("src")).expect("Failed to create upstream");
        git(&upstream, &["init", "-q", "-b", "gh-pages"]);
        git(&upstream, &["config", "user.email", "publisher@example.com"]);
        git(&upstream, &["config", "user.name", "Publisher"]);
        std::fs::write(upstream.join("src/index.js"), "// v0").expect("Failed to write");
        git(&upstream, &["add", "."]);
        git(&upstream, &["commit", "-q", "-m", "initial"]);
        upstream
    }

    /// Install a fake `npm` whose `run build` writes `build/index.html`, and
    /// return a `PATH` value that finds it first.
    pub fn fake_npm_path(&self) -> String {
        let bin = self.path().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
        let npm = bin.join("npm");
        std::fs::write(
            &npm,
            "#!/bin/sh\nif [ \"$1\" = run ] && [ \"$2\" = build ]; then\n  mkdir -p build && echo built > build/index.html\nfi\n",
        )
        .expect("Failed to write fake npm");

        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&npm, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake npm");

        format!(
            "{}:{}",
            bin.display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Run git in `dir`, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Read `versions.json` from an output directory.
#[allow(dead_code)]
pub fn read_index(out: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(out.join("versions.json")).expect("No versions.json");
    serde_json::from_str(&content).expect("versions.json is not a JSON array")
}
