//! distagg-lib: Core types and logic for build manifest aggregation
//!
//! Independent build jobs each leave a `manifest.json` under their own
//! subdirectory of a distribution root. This crate merges them into a single
//! `<root>/manifest.json`:
//! - `discover`: find and load `<root>/*/manifest.json` in a stable order
//! - `manifest`: the accepted per-build shapes and the aggregate document
//! - `dedupe`: collision-free build names
//! - `aggregate`: the end-to-end pipeline and its policy options
//! - `clock` / `revision`: injected collaborators for time and source revision

pub mod aggregate;
pub mod clock;
pub mod dedupe;
pub mod discover;
pub mod error;
pub mod manifest;
pub mod revision;
pub mod util;

pub use aggregate::{AggregateOptions, AggregateReport, Aggregator, RevisionPolicy};
pub use error::{AggregateError, Result};

/// Distribution root used when none is given.
pub const DEFAULT_DIST_DIR: &str = "dist";
