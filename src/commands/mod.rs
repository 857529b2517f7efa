//! # CLI Command Implementations
//!
//! Each subcommand of `visualizer-publish` lives in its own file with:
//! - an `Args` struct deriving `clap::Args`,
//! - an `execute` function that loads the configuration, calls into the
//!   `visualizer_publish` library and prints a short summary.

use std::path::PathBuf;

use visualizer_publish::output::OutputConfig;

pub mod init;
pub mod merge;
pub mod update;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Path of the configuration file.
    pub config: PathBuf,
    pub output: OutputConfig,
}
