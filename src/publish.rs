//! # Output Directory
//!
//! Filesystem primitives for the publish target. The directory holds:
//!
//! - one `<version>/` folder and `<version>.tar.gz` archive per release,
//! - the development snapshot `HEAD-min/` and `HEAD-min.tar.gz`,
//! - `latest` and `latest.tar.gz` symlinks to the newest stable release,
//! - `versions.json`, the index read by the visualizer's version picker.
//!
//! Nothing here is transactional. Every mutation assumes that no other
//! process reads or writes the directory at the same time.

use log::info;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::archive::archive_name;
use crate::error::{Error, Result};
use crate::version::{self, is_stable, parse_version_tag};

/// Symlink to the head clone's sources.
pub const HEAD: &str = "HEAD";
/// Development snapshot built from the tracked branch.
pub const HEAD_MIN: &str = "HEAD-min";
/// Temporary name of the previous snapshot while it is being replaced.
pub const OLD_HEAD_MIN: &str = "oldHEAD-min";
/// Alias of the newest stable release.
pub const LATEST: &str = "latest";
/// Version index file name.
pub const VERSIONS_FILE: &str = "versions.json";
/// Entries listed at the top of `versions.json`, before any release.
pub const RESERVED: [&str; 3] = [HEAD, HEAD_MIN, LATEST];

/// Whether nothing, not even a dangling symlink, exists at `path`.
pub fn missing(path: &Path) -> bool {
    fs::symlink_metadata(path).is_err()
}

/// Whether `path` itself is a symlink.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Remove whatever is at `path`: symlinks and files are unlinked, folders
/// are removed recursively.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Like [`remove_entry`], but an absent `path` is not an error.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match remove_entry(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Point `link` at `target`, replacing any previous symlink or file.
pub fn relink(target: &Path, link: &Path) -> Result<()> {
    match fs::remove_file(link) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }
    symlink(target, link)?;
    Ok(())
}

/// Create `link` -> `target` unless `link` already exists.
///
/// Returns whether the link was created. An existing entry that is not a
/// symlink is never overwritten and fails with [`Error::OccupiedPath`].
pub fn symlink_if_missing(target: &Path, link: &Path) -> Result<bool> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(false),
        Ok(_) => Err(Error::OccupiedPath {
            path: link.to_path_buf(),
        }),
        Err(_) => {
            symlink(target, link)?;
            Ok(true)
        }
    }
}

/// Path of the archive belonging to the folder at `path`.
pub fn archive_path(path: &Path) -> PathBuf {
    let mut archive = OsString::from(path.as_os_str());
    archive.push(".tar.gz");
    PathBuf::from(archive)
}

/// Replace `out/HEAD-min` with the freshly built `build_output`.
///
/// The swap is three renames, in this order:
///
/// 1. the current snapshot, if any, is renamed to `oldHEAD-min`;
/// 2. `build_output` is moved to `HEAD-min`;
/// 3. `oldHEAD-min` is deleted.
///
/// It is not atomic. A crash between steps 1 and 2 leaves no snapshot at
/// all, a crash between steps 2 and 3 leaves both copies on disk. The next
/// successful run repairs either state.
pub fn replace_snapshot(build_output: &Path, out: &Path) -> Result<PathBuf> {
    let current = out.join(HEAD_MIN);
    let old = out.join(OLD_HEAD_MIN);

    // A leftover from an interrupted run would block step 1.
    remove_if_exists(&old)?;

    let had_previous = match fs::rename(&current, &old) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };
    fs::rename(build_output, &current)?;
    if had_previous {
        fs::remove_dir_all(&old)?;
    }

    Ok(current)
}

/// Move the build output of a release into `out/<name>`.
pub fn publish_build(build_output: &Path, out: &Path, name: &str) -> Result<PathBuf> {
    let destination = out.join(name);
    fs::rename(build_output, &destination)?;
    Ok(destination)
}

/// Repoint `latest` and `latest.tar.gz` at `version`.
pub fn link_latest(out: &Path, version: &str) -> Result<()> {
    info!("Creating link to new latest release: {}", version);
    relink(&out.join(version), &out.join(LATEST))?;
    relink(
        &out.join(archive_name(version)),
        &out.join(archive_name(LATEST)),
    )
}

/// Names of every published version in `out`, in directory order.
pub fn version_entries(out: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(out)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if version::is_version_tag(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Whether `out` contains at least one published stable release.
pub fn has_stable_release(out: &Path) -> Result<bool> {
    Ok(version_entries(out)?
        .iter()
        .filter_map(|name| parse_version_tag(name))
        .any(|version| is_stable(&version)))
}

/// Compute the contents of `versions.json` from the directory listing.
pub fn versions_index(out: &Path) -> Result<Vec<String>> {
    let mut items: Vec<String> = RESERVED.iter().map(|name| name.to_string()).collect();
    items.extend(version::sort_newest_first(version_entries(out)?));
    Ok(items)
}

/// Recompute and write `out/versions.json`.
pub fn write_versions_index(out: &Path) -> Result<Vec<String>> {
    let items = versions_index(out)?;
    fs::write(out.join(VERSIONS_FILE), serde_json::to_string(&items)?)?;
    Ok(items)
}
