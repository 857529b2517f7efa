//! # Console Output
//!
//! Decides how the command summaries look. Scheduled runs usually write to a
//! log file, where status emojis are noise, so they are only used when the
//! terminal can show them.
//!
//! The following are respected:
//! - `--color=never|always|auto`
//! - `NO_COLOR` disables markers when set (per https://no-color.org/)
//! - `CLICOLOR=0` disables, `CLICOLOR_FORCE=1` forces
//! - `TERM=dumb` disables

use std::env;

/// Output configuration for the command summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the value of `--color` and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // NO_COLOR wins even when set to an empty string
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        // CLICOLOR=0 turns markers off
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        // CLICOLOR_FORCE keeps emojis when piping into a log file
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        // Cron environments often run with TERM=dumb
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Fall back to the terminal's own capabilities
        console::Term::stdout().features().colors_supported()
    }

    fn pick<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Marker for a completed step.
    pub fn ok(&self) -> &'static str {
        self.pick("✅", "[OK]")
    }

    /// Marker for a refused or failed step.
    pub fn fail(&self) -> &'static str {
        self.pick("❌", "[ERROR]")
    }

    /// Marker for a published artifact.
    pub fn package(&self) -> &'static str {
        self.pick("📦", "[PUBLISHED]")
    }

    /// Marker for a symlink change.
    pub fn link(&self) -> &'static str {
        self.pick("🔗", "[LINK]")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
