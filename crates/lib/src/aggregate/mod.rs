//! Aggregate assembly and persistence.
//!
//! Runs the whole pipeline for one distribution root:
//!
//! 1. Prepare the root (create it, or fail, per options)
//! 2. Discover and load `<root>/*/manifest.json` in subdirectory order
//! 3. Normalize records and optionally inject `distribution`
//! 4. Resolve the source revision per [`RevisionPolicy`]
//! 5. Deduplicate build names
//! 6. Write `<root>/manifest.json` atomically
//!
//! Every fallible step happens before the write, so a failed run leaves any
//! previous aggregate untouched.

mod options;

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::clock::{Clock, format_timestamp};
use crate::dedupe::{Rename, dedupe_names};
use crate::discover::{MANIFEST_FILENAME, discover, prepare_root};
use crate::error::{AggregateError, Result};
use crate::manifest::{AggregateManifest, BuildRecord, inject_distribution};
use crate::revision::RevisionProvider;
use crate::util::fs::write_atomic;

pub use options::{AggregateOptions, RevisionPolicy};

/// Outcome of a successful aggregation.
#[derive(Debug, Clone)]
pub struct AggregateReport {
  /// Path of the aggregate file (written unless `dry_run`).
  pub output: PathBuf,
  /// Number of per-build manifests merged.
  pub manifests: usize,
  pub renames: Vec<Rename>,
  pub written: bool,
  pub aggregate: AggregateManifest,
  /// The exact text that was (or would have been) written.
  pub rendered: String,
}

impl AggregateReport {
  pub fn builds(&self) -> usize {
    self.aggregate.builds.len()
  }
}

/// Aggregates the manifests under one distribution root.
///
/// Time and revision lookups are injected so runs are reproducible in tests.
pub struct Aggregator<'a> {
  root: PathBuf,
  options: AggregateOptions,
  clock: &'a dyn Clock,
  revisions: &'a dyn RevisionProvider,
}

impl<'a> Aggregator<'a> {
  pub fn new(
    root: impl Into<PathBuf>,
    options: AggregateOptions,
    clock: &'a dyn Clock,
    revisions: &'a dyn RevisionProvider,
  ) -> Self {
    Self {
      root: root.into(),
      options,
      clock,
      revisions,
    }
  }

  /// Path the aggregate is written to.
  pub fn output_path(&self) -> PathBuf {
    self.root.join(MANIFEST_FILENAME)
  }

  /// Run the pipeline and write the aggregate.
  pub fn run(&self) -> Result<AggregateReport> {
    let generated_at = format_timestamp(self.clock.now());

    prepare_root(&self.root, self.options.auto_create_root)?;
    let (manifests, mut builds) = self.collect()?;

    if manifests == 0 && self.options.strict_on_empty {
      return Err(AggregateError::Empty {
        root: self.root.clone(),
      });
    }

    let git_sha = self.resolve_revision()?;

    let renames = dedupe_names(&mut builds, git_sha.as_deref());
    for rename in &renames {
      warn!(from = %rename.from, to = %rename.to, "renamed colliding build");
    }

    let aggregate = AggregateManifest {
      generated_at,
      git_sha,
      builds,
    };
    let rendered = aggregate.to_json_pretty().map_err(AggregateError::Serialize)?;

    let output = self.output_path();
    let written = !self.options.dry_run;
    if written {
      write_atomic(&output, &rendered).map_err(|source| AggregateError::Write {
        path: output.clone(),
        source,
      })?;
      info!(
        path = %output.display(),
        manifests,
        builds = aggregate.builds.len(),
        "wrote aggregate manifest"
      );
    } else {
      debug!(path = %output.display(), "dry run, aggregate not written");
    }

    Ok(AggregateReport {
      output,
      manifests,
      renames,
      written,
      aggregate,
      rendered,
    })
  }

  /// Load every manifest in discovery order. Returns the manifest count and
  /// the concatenated records.
  fn collect(&self) -> Result<(usize, Vec<BuildRecord>)> {
    let mut manifests = 0;
    let mut builds = Vec::new();

    for entry in discover(&self.root)? {
      let entry = entry?;
      debug!(
        distribution = %entry.distribution,
        records = entry.shape.len(),
        "collected manifest"
      );

      let mut records = entry.shape.into_records();
      if self.options.inject_distribution {
        for record in &mut records {
          inject_distribution(record, &entry.distribution);
        }
      }

      builds.extend(records);
      manifests += 1;
    }

    Ok((manifests, builds))
  }

  fn resolve_revision(&self) -> Result<Option<String>> {
    match self.options.revision {
      RevisionPolicy::Omit => Ok(None),
      RevisionPolicy::Required => Ok(Some(self.revisions.revision()?)),
      RevisionPolicy::Optional => match self.revisions.revision() {
        Ok(sha) => Ok(Some(sha)),
        Err(e) => {
          warn!(error = %e, "source revision unavailable, omitting git_sha");
          Ok(None)
        }
      },
    }
  }
}
