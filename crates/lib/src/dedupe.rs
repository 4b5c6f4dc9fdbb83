//! Collision-free build names.
//!
//! Independent build jobs often report the same artifact name. Later
//! occurrences are renamed with the short revision, and a numeric suffix when
//! that is already taken:
//!
//! ```text
//! fw, fw, fw  ->  fw, fw-abcdef1, fw-abcdef1-2
//! ```
//!
//! Without a revision the numeric suffix is appended to the name directly
//! (`fw`, `fw-2`, `fw-3`).

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::manifest::{BuildRecord, NAME_KEY, record_name};
use crate::revision::short_revision;

/// A name rewritten during deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
  /// Position of the record in the aggregate `builds` list.
  pub index: usize,
  pub from: String,
  pub to: String,
}

/// Make every non-empty string `name` unique across `records`.
///
/// Records are processed in order, so the first occurrence of a name always
/// keeps it. Returns the renames in the order they were applied.
pub fn dedupe_names(records: &mut [BuildRecord], revision: Option<&str>) -> Vec<Rename> {
  let short = revision.map(short_revision).filter(|s| !s.is_empty());
  let mut seen: HashMap<String, usize> = HashMap::new();
  let mut renames = Vec::new();

  for (index, record) in records.iter_mut().enumerate() {
    let Some(name) = record_name(record).map(str::to_owned) else {
      continue;
    };

    let count = seen.get(&name).copied().unwrap_or(0);
    if count == 0 {
      seen.insert(name, 1);
      continue;
    }

    let renamed = free_candidate(&seen, &name, short, count);
    seen.insert(renamed.clone(), 1);
    seen.insert(name.clone(), count + 1);
    record.insert(NAME_KEY.to_string(), Value::String(renamed.clone()));

    renames.push(Rename {
      index,
      from: name,
      to: renamed,
    });
  }

  renames
}

/// First unused candidate for the `count`-th repeat of `name`.
fn free_candidate(seen: &HashMap<String, usize>, name: &str, short: Option<&str>, count: usize) -> String {
  let base = match short {
    Some(short) => {
      let base = format!("{}-{}", name, short);
      if !seen.contains_key(&base) {
        return base;
      }
      base
    }
    None => name.to_string(),
  };

  let mut n = count.max(2);
  loop {
    let candidate = format!("{}-{}", base, n);
    if !seen.contains_key(&candidate) {
      return candidate;
    }
    n += 1;
  }
}
