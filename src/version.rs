//! # Version Tags
//!
//! Release tags of the visualizer look like `v2.41.0` or `v2.42.0-beta.1`.
//! This module recognizes them, orders them by semantic-version precedence
//! and picks the newest stable (non-prerelease) one.
//!
//! Two notions of "valid" are used:
//!
//! - [`parse_version`] accepts what an operator may type on the command line:
//!   a semantic version with or without a leading `v`.
//! - [`parse_version_tag`] accepts what is published: a name starting with
//!   `v` and a digit whose remainder is a semantic version. This is the filter
//!   applied to output directory listings, so reserved names such as
//!   `latest` never qualify.
//!
//! Neither accepts archive names. `1.3.0-beta.tar.gz` is a valid semantic
//! version (prerelease `beta.tar.gz`), so the `.tar.gz` suffix is refused
//! before parsing.

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use crate::archive::is_archive_name;

static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d").expect("static regex is valid"));

/// Parse a version as typed by an operator (`v1.2.3` or `1.2.3`).
pub fn parse_version(input: &str) -> Option<Version> {
    if is_archive_name(input) {
        return None;
    }
    let version_str = input.strip_prefix('v').unwrap_or(input);
    Version::parse(version_str).ok()
}

/// Parse a published tag name; the `v` prefix is mandatory.
pub fn parse_version_tag(name: &str) -> Option<Version> {
    if !VERSION_PREFIX.is_match(name) {
        return None;
    }
    parse_version(name)
}

/// Whether `name` is a published version tag.
pub fn is_version_tag(name: &str) -> bool {
    parse_version_tag(name).is_some()
}

/// Whether a parsed version has no prerelease component.
pub fn is_stable(version: &Version) -> bool {
    version.pre.is_empty()
}

/// Keep the version tags among `names`, sorted newest-first.
pub fn sort_newest_first<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tagged: Vec<(Version, String)> = names
        .into_iter()
        .map(Into::into)
        .filter_map(|name| parse_version_tag(&name).map(|version| (version, name)))
        .collect();

    tagged.sort_by(|(a, _), (b, _)| b.cmp(a));
    tagged.into_iter().map(|(_, name)| name).collect()
}

/// Find the newest stable tag, ignoring prereleases and non-version names.
pub fn find_latest_stable<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    let mut latest: Option<(Version, &str)> = None;

    for tag in tags {
        let tag = tag.as_ref();
        let Some(version) = parse_version_tag(tag) else {
            continue;
        };
        if !is_stable(&version) {
            continue;
        }
        if latest.as_ref().is_none_or(|(current, _)| version > *current) {
            latest = Some((version, tag));
        }
    }

    latest.map(|(_, tag)| tag.to_string())
}
