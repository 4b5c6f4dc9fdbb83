//! Source revision lookup.
//!
//! The aggregate can be tagged with the commit the artifacts were built from.
//! Lookups go through [`RevisionProvider`] so the aggregation itself never
//! shells out directly.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Length of the revision prefix used when renaming colliding builds.
pub const SHORT_REVISION_LEN: usize = 7;

#[derive(Debug, Error)]
pub enum RevisionError {
  #[error("failed to run git: {0}")]
  Spawn(#[source] std::io::Error),

  #[error("git rev-parse HEAD failed ({status}): {stderr}")]
  Failed { status: String, stderr: String },

  #[error("git rev-parse HEAD returned an empty revision")]
  Empty,
}

/// Supplies the full revision identifier of the source tree.
pub trait RevisionProvider {
  fn revision(&self) -> Result<String, RevisionError>;
}

/// Queries `git rev-parse HEAD`, optionally inside a given repository.
#[derive(Debug, Clone, Default)]
pub struct GitRevision {
  repo: Option<PathBuf>,
}

impl GitRevision {
  /// Query the repository containing the current working directory.
  pub fn new() -> Self {
    Self::default()
  }

  /// Query the repository at `repo` (`git -C <repo>`).
  pub fn in_repo(repo: impl Into<PathBuf>) -> Self {
    Self {
      repo: Some(repo.into()),
    }
  }
}

impl RevisionProvider for GitRevision {
  fn revision(&self) -> Result<String, RevisionError> {
    let mut command = Command::new("git");
    if let Some(repo) = &self.repo {
      command.arg("-C").arg(repo);
    }
    command.args(["rev-parse", "HEAD"]);

    debug!(repo = ?self.repo, "resolving git revision");
    let output = command.output().map_err(RevisionError::Spawn)?;

    if !output.status.success() {
      return Err(RevisionError::Failed {
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
      return Err(RevisionError::Empty);
    }
    Ok(sha)
  }
}

/// A revision known up front, e.g. passed in by CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRevision(pub String);

impl RevisionProvider for FixedRevision {
  fn revision(&self) -> Result<String, RevisionError> {
    let sha = self.0.trim();
    if sha.is_empty() {
      return Err(RevisionError::Empty);
    }
    Ok(sha.to_string())
  }
}

/// First [`SHORT_REVISION_LEN`] characters of `revision`.
pub fn short_revision(revision: &str) -> &str {
  match revision.char_indices().nth(SHORT_REVISION_LEN) {
    Some((end, _)) => &revision[..end],
    None => revision,
  }
}
