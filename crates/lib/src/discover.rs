//! Per-build manifest discovery.
//!
//! Build jobs drop their output into one subdirectory each:
//!
//! ```text
//! dist/
//! ├── manifest.json          # aggregate (written by us, never read back)
//! ├── esp32/manifest.json
//! └── esp8266/manifest.json
//! ```
//!
//! Only `<root>/*/manifest.json` is considered. Subdirectories are visited in
//! lexicographic order, including hidden ones (leading `.`).

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AggregateError, Result};
use crate::manifest::ManifestShape;

/// File name of both per-build manifests and the aggregate.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// A per-build manifest found under the distribution root.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
  /// Name of the subdirectory holding the manifest.
  pub distribution: String,
  pub path: PathBuf,
  pub shape: ManifestShape,
}

/// Make sure `root` is a usable distribution directory.
///
/// A missing root is created when `auto_create` is set and is an error otherwise.
pub fn prepare_root(root: &Path, auto_create: bool) -> Result<()> {
  if root.is_dir() {
    return Ok(());
  }
  if root.exists() {
    return Err(AggregateError::RootNotDirectory {
      path: root.to_path_buf(),
    });
  }
  if !auto_create {
    return Err(AggregateError::RootNotFound {
      path: root.to_path_buf(),
    });
  }

  debug!(root = %root.display(), "creating distribution directory");
  fs::create_dir_all(root).map_err(|source| AggregateError::CreateRoot {
    path: root.to_path_buf(),
    source,
  })
}

/// List the candidate manifests under `root`.
///
/// The directory listing happens here; each manifest is only read when the
/// returned iterator reaches it.
pub fn discover(root: &Path) -> Result<Discovery> {
  let read_dir_err = |source| AggregateError::ReadDir {
    path: root.to_path_buf(),
    source,
  };

  let mut candidates: Vec<(OsString, PathBuf)> = Vec::new();
  for entry in fs::read_dir(root).map_err(read_dir_err)? {
    let entry = entry.map_err(read_dir_err)?;
    let name = entry.file_name();
    let path = entry.path().join(MANIFEST_FILENAME);
    candidates.push((name, path));
  }
  candidates.sort_by(|a, b| a.0.cmp(&b.0));

  debug!(root = %root.display(), candidates = candidates.len(), "listed distribution directory");
  Ok(Discovery {
    candidates: candidates.into_iter(),
  })
}

/// Lazily loads manifests in subdirectory order.
///
/// Yields an error for the first manifest that cannot be read or parsed;
/// callers are expected to stop there.
#[derive(Debug)]
pub struct Discovery {
  candidates: std::vec::IntoIter<(OsString, PathBuf)>,
}

impl Iterator for Discovery {
  type Item = Result<ManifestEntry>;

  fn next(&mut self) -> Option<Self::Item> {
    for (name, path) in self.candidates.by_ref() {
      if !path.is_file() {
        debug!(path = %path.display(), "no manifest, skipping");
        continue;
      }

      debug!(path = %path.display(), "loading manifest");
      let distribution = name.to_string_lossy().into_owned();
      return Some(ManifestShape::load(&path).map(|shape| ManifestEntry {
        distribution,
        path,
        shape,
      }));
    }
    None
  }
}
