//! # Release Merging
//!
//! Retires a published release by turning it into an alias of a newer one:
//! after `merge v1.2.0 v1.2.1`, both `v1.2.0/` and `v1.2.0.tar.gz` are
//! symlinks to `v1.2.1/` and `v1.2.1.tar.gz`.
//!
//! All checks run before anything is touched. A refused request is returned
//! as a [`MergeRejection`] and leaves the output directory as it was. An
//! accepted one deletes the old content for good; no backup is kept.

use log::info;
use semver::Version;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;

use crate::archive::archive_name;
use crate::error::{MergeRejection, Result};
use crate::publish;
use crate::version::parse_version;

/// Check that `version` is valid and published in `out`.
///
/// With `reject_alias`, a version that is already a symlink is refused too.
fn check_version(
    out: &Path,
    version: &str,
    reject_alias: bool,
) -> std::result::Result<Version, MergeRejection> {
    let parsed =
        parse_version(version).ok_or_else(|| MergeRejection::InvalidVersion(version.to_string()))?;

    let meta = fs::symlink_metadata(out.join(version))
        .map_err(|_| MergeRejection::Missing(version.to_string()))?;
    if reject_alias && meta.file_type().is_symlink() {
        return Err(MergeRejection::AlreadyMerged(version.to_string()));
    }
    Ok(parsed)
}

/// Validate a merge of `from` into `to` without changing anything.
pub fn validate(out: &Path, from: &str, to: &str) -> std::result::Result<(), MergeRejection> {
    let from_version = check_version(out, from, true)?;
    let to_version = check_version(out, to, false)?;
    if from_version >= to_version {
        return Err(MergeRejection::NotOlder {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(())
}

/// Replace release `from` with symlinks to release `to`.
pub fn merge(out: &Path, from: &str, to: &str) -> Result<()> {
    validate(out, from, to)?;

    let from_dir = out.join(from);
    let from_archive = out.join(archive_name(from));

    publish::remove_entry(&from_dir)?;
    publish::remove_if_exists(&from_archive)?;
    symlink(out.join(to), &from_dir)?;
    symlink(out.join(archive_name(to)), &from_archive)?;
    info!("Merged {} into {}", from, to);

    publish::write_versions_index(out)?;
    Ok(())
}
