//! Running external programs.
//!
//! Every collaborator of the publisher (`git`, `npm`/`yarn`, `tar`) is a
//! separate program. They all go through [`run`], which waits for the child
//! to exit and turns a non-zero status into [`Error::Command`] carrying the
//! captured stderr.

use log::debug;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` inside `cwd` and wait for it to finish.
pub fn run(program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
    debug!("Running {} {} in {}", program, args.join(" "), cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(Error::Command {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            cwd: cwd.to_path_buf(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
