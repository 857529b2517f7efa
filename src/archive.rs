//! Packaging published folders as `.tar.gz` archives with the system `tar`.
//!
//! Archives sit next to the folder they were made from and contain it under
//! its own name, so `v2.41.0.tar.gz` unpacks to `v2.41.0/`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::process;

/// Suffix shared by every archive in the output directory.
pub const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// File name of the archive for the published entry `name`.
pub fn archive_name(name: &str) -> String {
    format!("{}{}", name, ARCHIVE_EXTENSION)
}

/// Whether `name` is an archive file name rather than a published entry.
pub fn is_archive_name(name: &str) -> bool {
    name.ends_with(ARCHIVE_EXTENSION)
}

/// Compress `out/name` into `out/name.tar.gz`, replacing any previous archive.
pub fn compress(out: &Path, name: &str) -> Result<PathBuf> {
    let archive = archive_name(name);
    process::run("tar", &["-czf", &archive, name], out)?;
    Ok(out.join(archive))
}
