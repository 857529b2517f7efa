//! Detection of newly fetched release tags.
//!
//! `git pull --tags` reports every tag it fetched on stderr, one per line:
//!
//! ```text
//!  * [new tag]         v2.41.0     -> v2.41.0
//! ```
//!
//! This is informational text rather than structured data, so the parser is
//! kept here in isolation: the pipeline only sees the resulting [`NewTags`]
//! and the matching can be replaced by a ref diff without touching it.

use log::warn;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use crate::version::{is_stable, parse_version_tag};

const NEW_TAG_MARKER: &str = "[new tag]";

static NEW_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[new tag\] *([^ ]*) *->").expect("static regex is valid"));

/// Tags announced by one pull, in the order git reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTags {
    pub tags: Vec<String>,
    /// Highest stable tag among `tags`.
    pub latest: Option<String>,
}

/// Extract new version tags from the diagnostic output of `git pull --tags`.
pub fn parse_new_tags(pull_stderr: &str) -> NewTags {
    let mut found = NewTags::default();
    if !pull_stderr.contains(NEW_TAG_MARKER) {
        return found;
    }

    let mut best: Option<(Version, String)> = None;
    for line in pull_stderr.split(['\r', '\n']) {
        let Some(captures) = NEW_TAG_LINE.captures(line) else {
            continue;
        };
        let tag = &captures[1];
        if !tag.starts_with('v') {
            continue;
        }
        let Some(version) = parse_version_tag(tag) else {
            warn!("Ignoring tag {} which is not a valid version", tag);
            continue;
        };

        found.tags.push(tag.to_string());
        if is_stable(&version) && best.as_ref().is_none_or(|(current, _)| version > *current) {
            best = Some((version, tag.to_string()));
        }
    }

    found.latest = best.map(|(_, tag)| tag);
    found
}
