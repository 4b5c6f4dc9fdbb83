//! Error types for manifest aggregation.

use std::path::PathBuf;

use thiserror::Error;

use crate::revision::RevisionError;

/// Errors that abort an aggregation run.
///
/// Every variant is fatal: the aggregate file is never written once one of
/// these has been produced.
#[derive(Debug, Error)]
pub enum AggregateError {
  /// The distribution root does not exist and auto-creation is disabled.
  #[error("distribution directory '{}' does not exist; nothing to aggregate", path.display())]
  RootNotFound { path: PathBuf },

  /// The distribution root exists but is not a directory.
  #[error("distribution path '{}' is not a directory", path.display())]
  RootNotDirectory { path: PathBuf },

  #[error("failed to create distribution directory {}: {source}", path.display())]
  CreateRoot {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read directory {}: {source}", path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("manifest {} is not valid JSON: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("manifest {} has a non-list 'builds' entry", path.display())]
  NonListBuilds { path: PathBuf },

  #[error("unsupported manifest format in {}: expected an object or a list, found {kind}", path.display())]
  UnsupportedShape { path: PathBuf, kind: &'static str },

  #[error("manifest {} has a non-object build record at index {index}", path.display())]
  NonObjectRecord { path: PathBuf, index: usize },

  /// Strict mode found no per-build manifests under the root.
  #[error(
    "no manifest.json files found in '{}'; nothing to aggregate (ensure the build jobs produced outputs before publishing)",
    root.display()
  )]
  Empty { root: PathBuf },

  #[error("failed to determine source revision: {0}")]
  Revision(#[from] RevisionError),

  #[error("failed to serialize aggregate manifest: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write aggregate manifest {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = AggregateError> = std::result::Result<T, E>;
