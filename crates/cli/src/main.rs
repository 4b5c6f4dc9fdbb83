mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use distagg_lib::{AggregateOptions, DEFAULT_DIST_DIR, RevisionPolicy};

use crate::cmd::{RevisionSource, cmd_aggregate};
use crate::output::{OutputFormat, print_error};

/// Policy preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
  /// Create a missing root, accept zero manifests, require a git revision
  #[default]
  Lenient,
  /// Require the root and at least one manifest, tag builds with their distribution
  Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RevisionArg {
  /// Fail if the revision can't be determined
  Required,
  /// Leave out git_sha if the revision can't be determined
  Optional,
  /// Never look up a revision
  Omit,
}

impl From<RevisionArg> for RevisionPolicy {
  fn from(arg: RevisionArg) -> Self {
    match arg {
      RevisionArg::Required => RevisionPolicy::Required,
      RevisionArg::Optional => RevisionPolicy::Optional,
      RevisionArg::Omit => RevisionPolicy::Omit,
    }
  }
}

/// distagg - Merge per-build manifest.json files into one aggregate manifest
#[derive(Parser, Debug)]
#[command(name = "distagg")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Distribution root holding one subdirectory per build
  #[arg(default_value = DEFAULT_DIST_DIR)]
  dist_dir: PathBuf,

  /// Policy preset; the flags below override individual settings
  #[arg(long, value_enum, default_value_t = Mode::Lenient)]
  mode: Mode,

  /// Fail when no manifests are found
  #[arg(long, overrides_with = "allow_empty")]
  strict_on_empty: bool,

  /// Write an empty aggregate when no manifests are found
  #[arg(long, overrides_with = "strict_on_empty")]
  allow_empty: bool,

  /// Create the distribution root if it is missing
  #[arg(long, overrides_with = "no_create_root")]
  create_root: bool,

  /// Fail if the distribution root is missing
  #[arg(long, overrides_with = "create_root")]
  no_create_root: bool,

  /// Add a `distribution` field naming each build's subdirectory
  #[arg(long, overrides_with = "no_distribution")]
  distribution: bool,

  /// Leave records without a `distribution` field as they are
  #[arg(long, overrides_with = "distribution")]
  no_distribution: bool,

  /// How to treat the source revision
  #[arg(long, value_enum)]
  revision_policy: Option<RevisionArg>,

  /// Use this revision instead of asking git
  #[arg(long, value_name = "SHA")]
  revision: Option<String>,

  /// Repository to query for the revision (default: current directory)
  #[arg(long, value_name = "PATH", conflicts_with = "revision")]
  repo: Option<PathBuf>,

  /// Print the aggregate instead of writing it
  #[arg(long)]
  dry_run: bool,

  /// Summary format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

/// Resolve a `--flag` / `--no-flag` pair; `None` keeps the preset.
fn toggle(on: bool, off: bool) -> Option<bool> {
  match (on, off) {
    (true, _) => Some(true),
    (_, true) => Some(false),
    _ => None,
  }
}

impl Cli {
  fn options(&self) -> AggregateOptions {
    let mut options = match self.mode {
      Mode::Lenient => AggregateOptions::lenient(),
      Mode::Strict => AggregateOptions::strict(),
    };

    if let Some(strict) = toggle(self.strict_on_empty, self.allow_empty) {
      options.strict_on_empty = strict;
    }
    if let Some(create) = toggle(self.create_root, self.no_create_root) {
      options.auto_create_root = create;
    }
    if let Some(inject) = toggle(self.distribution, self.no_distribution) {
      options.inject_distribution = inject;
    }
    options.revision = match (self.revision_policy, &self.revision) {
      (Some(policy), _) => policy.into(),
      (None, Some(_)) => RevisionPolicy::Required,
      (None, None) => options.revision,
    };
    options.dry_run = self.dry_run;

    options
  }

  fn revision_source(&self) -> RevisionSource {
    match &self.revision {
      Some(sha) => RevisionSource::Fixed(sha.clone()),
      None => RevisionSource::Git {
        repo: self.repo.clone(),
      },
    }
  }
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = cmd_aggregate(
    &cli.dist_dir,
    cli.options(),
    &cli.revision_source(),
    cli.format,
    cli.verbose,
  );

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
