//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use visualizer_publish::config::DEFAULT_CONFIG_FILE;
use visualizer_publish::output::OutputConfig;

/// Visualizer Publish - Rebuild and publish visualizer releases to a CDN directory
#[derive(Parser, Debug)]
#[command(name = "visualizer-publish")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `update`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the JSON configuration file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "VISUALIZER_PUBLISH_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pull upstream changes and publish the snapshot and any new releases
    Update(commands::update::UpdateArgs),

    /// Prepare clones, symlinks and static files (safe to run repeatedly)
    Init(commands::init::InitArgs),

    /// Merge a release into another one
    Merge(commands::merge::MergeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_target(false)
        .init();

        let ctx = commands::Context {
            config: self.config,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            None => commands::update::execute(commands::update::UpdateArgs::default(), &ctx),
            Some(Commands::Update(args)) => commands::update::execute(args, &ctx),
            Some(Commands::Init(args)) => commands::init::execute(args, &ctx),
            Some(Commands::Merge(args)) => commands::merge::execute(args, &ctx),
        }
    }
}
