//! Installing dependencies and building a checkout with `npm` or `yarn`.
//!
//! Both package managers leave the bundled visualizer in a `build/` folder
//! at the root of the checkout.

use std::path::{Path, PathBuf};

use crate::config::PackageManager;
use crate::error::{Error, Result};
use crate::process;

/// Folder, relative to a checkout, holding the build output.
pub const BUILD_OUTPUT_DIR: &str = "build";

/// Install the checkout's dependencies.
pub fn install(manager: PackageManager, checkout: &Path) -> Result<()> {
    process::run(manager.program(), &["install"], checkout)?;
    Ok(())
}

/// Run the `build` script and return the produced output folder.
pub fn build(manager: PackageManager, checkout: &Path) -> Result<PathBuf> {
    process::run(manager.program(), &["run", "build"], checkout)?;
    existing_output(checkout)
}

/// Location of the build output of `checkout`, failing if it is absent.
pub fn existing_output(checkout: &Path) -> Result<PathBuf> {
    let output = checkout.join(BUILD_OUTPUT_DIR);
    if !output.is_dir() {
        return Err(Error::MissingBuildOutput { path: output });
    }
    Ok(output)
}
