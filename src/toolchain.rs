//! # External Collaborators
//!
//! The publisher drives three external tools: `git`, a package manager and
//! `tar`. This module puts each behind a trait so the pipeline and the
//! initializer only talk to a [`Toolchain`]:
//!
//! - **`GitOperations`**: clone, discard local changes, pull, checkout and
//!   tag listing on a local clone.
//! - **`BuildOperations`**: dependency installation and the build script.
//! - **`ArchiveOperations`**: `.tar.gz` packaging of a published folder.
//!
//! The `Default*` implementations shell out to the real programs. Tests swap
//! them for mocks so whole runs can be simulated against a temporary output
//! directory.

use std::path::{Path, PathBuf};

use crate::config::PackageManager;
use crate::error::Result;
use crate::process::CommandOutput;

/// Git actions performed on the head and build clones.
pub trait GitOperations {
    /// Clone `source` (a URL or a local path) into `cwd/name`.
    fn clone_repo(&self, source: &str, name: &str, cwd: &Path) -> Result<()>;

    /// Throw away local modifications in `repo`.
    fn discard_changes(&self, repo: &Path) -> Result<()>;

    /// Pull `branch` with tags and return the command output.
    fn pull(&self, repo: &Path, branch: &str) -> Result<CommandOutput>;

    /// Check out a branch or any other reference.
    fn checkout(&self, repo: &Path, reference: &str) -> Result<()>;

    /// Check out a release tag.
    fn checkout_tag(&self, repo: &Path, tag: &str) -> Result<()> {
        self.checkout(repo, &format!("tags/{}", tag))
    }

    /// List every tag known to `repo`.
    fn list_tags(&self, repo: &Path) -> Result<Vec<String>>;
}

/// Dependency installation and bundling of a checkout.
pub trait BuildOperations {
    fn install(&self, checkout: &Path) -> Result<()>;

    /// Build `checkout` and return the folder holding the output.
    fn build(&self, checkout: &Path) -> Result<PathBuf>;
}

/// Packaging of published folders.
pub trait ArchiveOperations {
    /// Compress `out/name` into `out/name.tar.gz`.
    fn compress(&self, out: &Path, name: &str) -> Result<PathBuf>;
}

/// `GitOperations` backed by the system `git` binary.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repo(&self, source: &str, name: &str, cwd: &Path) -> Result<()> {
        crate::git::clone(source, name, cwd)
    }

    fn discard_changes(&self, repo: &Path) -> Result<()> {
        crate::git::discard_changes(repo)
    }

    fn pull(&self, repo: &Path, branch: &str) -> Result<CommandOutput> {
        crate::git::pull(repo, branch)
    }

    fn checkout(&self, repo: &Path, reference: &str) -> Result<()> {
        crate::git::checkout(repo, reference)
    }

    fn checkout_tag(&self, repo: &Path, tag: &str) -> Result<()> {
        crate::git::checkout_tag(repo, tag)
    }

    fn list_tags(&self, repo: &Path) -> Result<Vec<String>> {
        crate::git::list_tags(repo)
    }
}

/// `BuildOperations` backed by `npm` or `yarn`.
pub struct DefaultBuildOperations {
    manager: PackageManager,
}

impl DefaultBuildOperations {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }
}

impl BuildOperations for DefaultBuildOperations {
    fn install(&self, checkout: &Path) -> Result<()> {
        crate::build::install(self.manager, checkout)
    }

    fn build(&self, checkout: &Path) -> Result<PathBuf> {
        crate::build::build(self.manager, checkout)
    }
}

/// `ArchiveOperations` backed by the system `tar` binary.
pub struct DefaultArchiveOperations;

impl ArchiveOperations for DefaultArchiveOperations {
    fn compress(&self, out: &Path, name: &str) -> Result<PathBuf> {
        crate::archive::compress(out, name)
    }
}

/// The set of external tools used by a run.
pub struct Toolchain {
    git: Box<dyn GitOperations>,
    builder: Box<dyn BuildOperations>,
    archiver: Box<dyn ArchiveOperations>,
}

impl Toolchain {
    /// Creates a toolchain that runs the real programs, building with `manager`.
    pub fn new(manager: PackageManager) -> Self {
        Self {
            git: Box::new(DefaultGitOperations),
            builder: Box::new(DefaultBuildOperations::new(manager)),
            archiver: Box::new(DefaultArchiveOperations),
        }
    }

    /// Creates a toolchain from custom implementations.
    pub fn with_operations(
        git: Box<dyn GitOperations>,
        builder: Box<dyn BuildOperations>,
        archiver: Box<dyn ArchiveOperations>,
    ) -> Self {
        Self {
            git,
            builder,
            archiver,
        }
    }

    pub fn git(&self) -> &dyn GitOperations {
        self.git.as_ref()
    }

    pub fn builder(&self) -> &dyn BuildOperations {
        self.builder.as_ref()
    }

    pub fn archiver(&self) -> &dyn ArchiveOperations {
        self.archiver.as_ref()
    }
}

/// Mock collaborators shared by the pipeline and initializer tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::{Arc, Mutex};

    /// Ordered record of every call made to any mock of one toolchain.
    pub type CallLog = Arc<Mutex<Vec<String>>>;

    fn short(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn failure(program: &str, what: &str) -> Error {
        Error::Command {
            program: program.to_string(),
            args: vec![what.to_string()],
            cwd: PathBuf::from("/mock"),
            stderr: format!("mock failure: {}", what),
        }
    }

    pub struct MockGitOperations {
        pub calls: CallLog,
        pub pulls: Mutex<HashMap<String, CommandOutput>>,
        pub tags: Vec<String>,
        pub fail_on: Option<String>,
    }

    impl MockGitOperations {
        pub fn new(calls: CallLog) -> Self {
            Self {
                calls,
                pulls: Mutex::new(HashMap::new()),
                tags: Vec::new(),
                fail_on: None,
            }
        }

        /// Answer pulls in the clone named `clone` with the given output.
        pub fn with_pull(self, clone: &str, stdout: &str, stderr: &str) -> Self {
            self.pulls.lock().unwrap().insert(
                clone.to_string(),
                CommandOutput {
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
            );
            self
        }

        pub fn with_tags(mut self, tags: &[&str]) -> Self {
            self.tags = tags.iter().map(|tag| tag.to_string()).collect();
            self
        }

        /// Fail the call whose log entry equals `call`.
        pub fn failing_on(mut self, call: &str) -> Self {
            self.fail_on = Some(call.to_string());
            self
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call.clone());
            if self.fail_on.as_deref() == Some(call.as_str()) {
                return Err(failure("git", &call));
            }
            Ok(())
        }
    }

    impl GitOperations for MockGitOperations {
        fn clone_repo(&self, source: &str, name: &str, cwd: &Path) -> Result<()> {
            self.record(format!("git clone {} {}", source, name))?;
            fs::create_dir_all(cwd.join(name).join(".git"))?;
            Ok(())
        }

        fn discard_changes(&self, repo: &Path) -> Result<()> {
            self.record(format!("git reset {}", short(repo)))
        }

        fn pull(&self, repo: &Path, _branch: &str) -> Result<CommandOutput> {
            let clone = short(repo);
            self.record(format!("git pull {}", clone))?;
            Ok(self
                .pulls
                .lock()
                .unwrap()
                .get(&clone)
                .cloned()
                .unwrap_or_else(|| CommandOutput {
                    stdout: "Already up to date.\n".to_string(),
                    stderr: String::new(),
                }))
        }

        fn checkout(&self, repo: &Path, reference: &str) -> Result<()> {
            self.record(format!("git checkout {} {}", short(repo), reference))
        }

        fn list_tags(&self, repo: &Path) -> Result<Vec<String>> {
            self.record(format!("git tag {}", short(repo)))?;
            Ok(self.tags.clone())
        }
    }

    /// Writes a `build/index.html` into the checkout instead of bundling.
    pub struct MockBuildOperations {
        pub calls: CallLog,
    }

    impl BuildOperations for MockBuildOperations {
        fn install(&self, checkout: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("install {}", short(checkout)));
            Ok(())
        }

        fn build(&self, checkout: &Path) -> Result<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("build {}", short(checkout)));
            let output = checkout.join(crate::build::BUILD_OUTPUT_DIR);
            fs::create_dir_all(&output)?;
            fs::write(output.join("index.html"), format!("built from {}", short(checkout)))?;
            Ok(output)
        }
    }

    /// Writes a placeholder file where the archive would be.
    pub struct MockArchiveOperations {
        pub calls: CallLog,
    }

    impl ArchiveOperations for MockArchiveOperations {
        fn compress(&self, out: &Path, name: &str) -> Result<PathBuf> {
            self.calls.lock().unwrap().push(format!("tar {}", name));
            let archive = out.join(crate::archive::archive_name(name));
            fs::write(&archive, format!("archive of {}", name))?;
            Ok(archive)
        }
    }

    /// Assemble a toolchain around `git`, with mock build and archive steps
    /// logging into the same `CallLog`.
    pub fn toolchain(git: MockGitOperations) -> Toolchain {
        let calls = git.calls.clone();
        Toolchain::with_operations(
            Box::new(git),
            Box::new(MockBuildOperations {
                calls: calls.clone(),
            }),
            Box::new(MockArchiveOperations { calls }),
        )
    }
}
