//! Aggregation policy.
//!
//! Two publishing flows use this tool with different expectations, captured as
//! presets:
//!
//! | Option                | `lenient()` | `strict()` |
//! |-----------------------|-------------|------------|
//! | `strict_on_empty`     | false       | true       |
//! | `auto_create_root`    | true        | false      |
//! | `inject_distribution` | false       | true       |
//! | `revision`            | Required    | Omit       |

/// Whether and how the aggregate is tagged with a source revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevisionPolicy {
  /// Look up the revision; failure aborts the run.
  #[default]
  Required,
  /// Look up the revision; on failure `git_sha` is left out.
  Optional,
  /// Never look up a revision.
  Omit,
}

/// Options for an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
  /// Fail when no per-build manifest is found.
  pub strict_on_empty: bool,
  /// Create the distribution root if it is missing.
  pub auto_create_root: bool,
  /// Add `distribution` (the subdirectory name) to records lacking it.
  pub inject_distribution: bool,
  pub revision: RevisionPolicy,
  /// Assemble the aggregate but don't write it.
  pub dry_run: bool,
}

impl AggregateOptions {
  /// Release bundling: tolerate an empty or missing root, tag with the revision.
  pub fn lenient() -> Self {
    Self {
      strict_on_empty: false,
      auto_create_root: true,
      inject_distribution: false,
      revision: RevisionPolicy::Required,
      dry_run: false,
    }
  }

  /// Firmware publishing: require build output, record where each build came from.
  pub fn strict() -> Self {
    Self {
      strict_on_empty: true,
      auto_create_root: false,
      inject_distribution: true,
      revision: RevisionPolicy::Omit,
      dry_run: false,
    }
  }
}

impl Default for AggregateOptions {
  fn default() -> Self {
    Self::lenient()
  }
}
