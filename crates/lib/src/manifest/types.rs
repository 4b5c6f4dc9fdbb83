//! Record and aggregate types.
//!
//! Build records are kept as loose JSON objects: each build job decides what
//! metadata it reports, and the aggregator only ever touches the `name` and
//! `distribution` keys. Key order is preserved as read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key used for collision detection.
pub const NAME_KEY: &str = "name";

/// Key holding the subdirectory a record was discovered in.
pub const DISTRIBUTION_KEY: &str = "distribution";

/// Metadata about one completed build.
pub type BuildRecord = Map<String, Value>;

/// The merged output written to `<dist_root>/manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateManifest {
  /// ISO-8601 UTC timestamp captured when the aggregate was assembled.
  pub generated_at: String,
  /// Full source revision, when one was resolved.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub git_sha: Option<String>,
  pub builds: Vec<BuildRecord>,
}

impl AggregateManifest {
  /// Render as pretty-printed JSON (2-space indentation) with a trailing newline.
  pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(self)?;
    rendered.push('\n');
    Ok(rendered)
  }
}

/// Returns the record's name if it takes part in collision tracking.
///
/// Only non-empty strings count. Missing, null, falsy and non-string names are
/// passed through untouched by deduplication. A truthy non-string such as `42`
/// is not stringified into `"42-abcdef1"`: `name` is a string field, so two
/// records named `7` are left as they are.
pub fn record_name(record: &BuildRecord) -> Option<&str> {
  match record.get(NAME_KEY) {
    Some(Value::String(name)) if !name.is_empty() => Some(name.as_str()),
    _ => None,
  }
}

/// Set `distribution` unless the record already carries one.
pub fn inject_distribution(record: &mut BuildRecord, distribution: &str) {
  if !record.contains_key(DISTRIBUTION_KEY) {
    record.insert(DISTRIBUTION_KEY.to_string(), Value::String(distribution.to_string()));
  }
}
