//! Test utilities for distagg-lib.
//!
//! Helpers for laying out distribution directories in temp dirs.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::discover::MANIFEST_FILENAME;

/// Write `content` as `<root>/<distribution>/manifest.json`.
pub fn write_manifest(root: &Path, distribution: &str, content: &Value) -> PathBuf {
  write_raw_manifest(root, distribution, &serde_json::to_string_pretty(content).unwrap())
}

/// Write raw text as `<root>/<distribution>/manifest.json`.
pub fn write_raw_manifest(root: &Path, distribution: &str, content: &str) -> PathBuf {
  let dir = root.join(distribution);
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join(MANIFEST_FILENAME);
  std::fs::write(&path, content).unwrap();
  path
}
