//! # Error Handling
//!
//! This module defines the error types shared by the publishing library. It
//! uses `thiserror` to describe every failure mode with enough context to
//! diagnose a failed scheduled run from its log alone.
//!
//! ## Key Components
//!
//! - **`Error`**: Fatal failures. Any external command (`git`, `npm`/`yarn`,
//!   `tar`) exiting unsuccessfully ends up here, as do configuration and
//!   filesystem problems. A run that hits one of these stops immediately;
//!   running the pipeline again is the recovery mechanism.
//!
//! - **`MergeRejection`**: Operator input problems detected by the `merge`
//!   command before anything is touched on disk. These are reported, not
//!   treated as crashes.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for publishing operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("Could not find config.json. Please copy config.default.json and use it as an example")]
    ConfigMissing { path: PathBuf },

    /// The configuration file exists but could not be understood.
    #[error("Configuration parsing error in {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// An external program could not be started at all.
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// An external program ran and exited unsuccessfully.
    #[error("Command failed in {}: {program} {} - {stderr}", cwd.display(), args.join(" "))]
    Command {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
        stderr: String,
    },

    /// A non-symlink entry sits where a managed symlink should be created.
    #[error("There is already a file named {}", path.display())]
    OccupiedPath { path: PathBuf },

    /// The build step finished but did not leave an output folder behind.
    #[error("Build output not found at {}", path.display())]
    MissingBuildOutput { path: PathBuf },

    /// Operator input to `merge` was refused.
    #[error(transparent)]
    MergeRejected(#[from] MergeRejection),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a `merge` request is refused without touching the output directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeRejection {
    #[error("Invalid version number: {0}")]
    InvalidVersion(String),

    #[error("Version {0} does not exist")]
    Missing(String),

    #[error("Version {0} was already merged")]
    AlreadyMerged(String),

    #[error("\"from\" must be lower than \"to\" ({from} >= {to})")]
    NotOlder { from: String, to: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
