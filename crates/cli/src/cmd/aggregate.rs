//! Implementation of the `distagg` command.
//!
//! Merges every `<dist>/*/manifest.json` into `<dist>/manifest.json` and
//! reports what was aggregated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use distagg_lib::clock::SystemClock;
use distagg_lib::dedupe::Rename;
use distagg_lib::revision::{FixedRevision, GitRevision, RevisionProvider, short_revision};
use distagg_lib::{AggregateOptions, AggregateReport, Aggregator};

use crate::output::{OutputFormat, print_json, print_stat, print_success, symbols};

/// Where the source revision comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionSource {
  /// `git rev-parse HEAD`, in `repo` or the current directory.
  Git { repo: Option<PathBuf> },
  /// Supplied on the command line.
  Fixed(String),
}

impl RevisionSource {
  fn provider(&self) -> Box<dyn RevisionProvider> {
    match self {
      RevisionSource::Git { repo: Some(repo) } => Box::new(GitRevision::in_repo(repo)),
      RevisionSource::Git { repo: None } => Box::new(GitRevision::new()),
      RevisionSource::Fixed(sha) => Box::new(FixedRevision(sha.clone())),
    }
  }
}

#[derive(Serialize)]
struct Summary<'a> {
  output: &'a Path,
  manifests: usize,
  builds: usize,
  git_sha: Option<&'a str>,
  renamed: &'a [Rename],
}

/// Execute the aggregation.
///
/// With `dry_run` set the aggregate JSON is printed to stdout instead of being
/// written; otherwise a one-line summary (or a JSON summary) is printed.
///
/// # Errors
///
/// Returns an error if the root is unusable, a manifest is malformed, strict
/// mode finds nothing to aggregate, a required revision can't be resolved, or
/// the output can't be written.
pub fn cmd_aggregate(
  root: &Path,
  options: AggregateOptions,
  revision: &RevisionSource,
  format: OutputFormat,
  verbose: bool,
) -> Result<()> {
  debug!(root = %root.display(), ?options, ?revision, "starting aggregation");

  let clock = SystemClock;
  let provider = revision.provider();

  let report = Aggregator::new(root, options, &clock, provider.as_ref())
    .run()
    .with_context(|| format!("Failed to aggregate manifests in {}", root.display()))?;

  if !report.written {
    print!("{}", report.rendered);
    return Ok(());
  }

  if format.is_json() {
    print_json(&Summary {
      output: &report.output,
      manifests: report.manifests,
      builds: report.builds(),
      git_sha: report.aggregate.git_sha.as_deref(),
      renamed: &report.renames,
    })?;
  } else {
    print_text_summary(&report, verbose);
  }

  Ok(())
}

fn print_text_summary(report: &AggregateReport, verbose: bool) {
  print_success(&format!(
    "Aggregated {} manifest(s) into {}",
    report.manifests,
    report.output.display()
  ));

  if !verbose {
    return;
  }

  print_stat("Builds", &report.builds().to_string());
  if let Some(sha) = &report.aggregate.git_sha {
    print_stat("Revision", short_revision(sha));
  }
  for rename in &report.renames {
    print_stat("Renamed", &format!("{} {} {}", rename.from, symbols::ARROW, rename.to));
  }
}
