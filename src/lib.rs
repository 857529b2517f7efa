//! # Visualizer Publishing Library
//!
//! This library keeps a content-delivery directory in sync with the
//! visualizer's git repository. It is used by the `visualizer-publish`
//! command-line tool, which a scheduler runs periodically.
//!
//! ## Quick Example
//!
//! ```
//! use visualizer_publish::tags::parse_new_tags;
//! use visualizer_publish::version::sort_newest_first;
//!
//! // Tags announced by `git pull --tags`
//! let found = parse_new_tags(" * [new tag]  v1.2.0 -> v1.2.0\n * [new tag]  v1.3.0-beta -> v1.3.0-beta\n");
//! assert_eq!(found.tags, vec!["v1.2.0", "v1.3.0-beta"]);
//! assert_eq!(found.latest.as_deref(), Some("v1.2.0"));
//!
//! // Ordering used by versions.json
//! let sorted = sort_newest_first(["v1.2.0", "latest", "v1.10.0"]);
//! assert_eq!(sorted, vec!["v1.10.0", "v1.2.0"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: where the clones and the output directory
//!   live, read from `config.json`.
//! - **Toolchain (`toolchain`)**: the external programs (`git`, `npm`/`yarn`,
//!   `tar`) behind traits, with `git`, `build` and `archive` holding the real
//!   shell-outs.
//! - **Output directory (`publish`)**: snapshot replacement, `latest`
//!   symlinks and the `versions.json` index.
//!
//! ## Workflows
//!
//! - **`init`**: idempotent setup of clones, symlinks and static files.
//! - **`pipeline`**: the sync-and-publish run.
//! - **`merge`**: retiring a release as an alias of a newer one.
//!
//! The output directory relies on symlinks, so the library targets Unix.

pub mod archive;
pub mod build;
pub mod config;
pub mod error;
pub mod git;
pub mod init;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod publish;
pub mod tags;
pub mod toolchain;
pub mod version;
