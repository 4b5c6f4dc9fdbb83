//! Per-build manifest loading.
//!
//! A build job may write its `manifest.json` in one of three shapes:
//!
//! ```text
//! { "builds": [ {...}, {...} ] }   // Wrapped
//! [ {...}, {...} ]                 // List
//! { "name": "fw", ... }            // Single
//! ```
//!
//! The shape is resolved once when the file is loaded; everything downstream
//! works on the resulting [`ManifestShape`].

mod types;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{AggregateError, Result};

pub use types::*;

/// Key holding the record list in the wrapped shape.
const BUILDS_KEY: &str = "builds";

/// A parsed per-build manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestShape {
  /// An object with a `builds` list. Other top-level keys are dropped.
  Wrapped(Vec<BuildRecord>),
  /// A bare list of records.
  List(Vec<BuildRecord>),
  /// A single record.
  Single(BuildRecord),
}

impl ManifestShape {
  /// Read and parse the manifest at `path`.
  ///
  /// The file is read fully and closed before parsing.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|source| AggregateError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| AggregateError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_value(path, value)
  }

  /// Resolve the shape of already-parsed JSON. `path` is used for error reporting.
  pub fn from_value(path: &Path, value: Value) -> Result<Self> {
    match value {
      Value::Object(mut map) if map.contains_key(BUILDS_KEY) => match map.remove(BUILDS_KEY) {
        Some(Value::Array(items)) => Ok(Self::Wrapped(records_from_array(path, items)?)),
        Some(Value::Null) | None => Ok(Self::Wrapped(Vec::new())),
        Some(_) => Err(AggregateError::NonListBuilds {
          path: path.to_path_buf(),
        }),
      },
      Value::Object(map) => Ok(Self::Single(map)),
      Value::Array(items) => Ok(Self::List(records_from_array(path, items)?)),
      other => Err(AggregateError::UnsupportedShape {
        path: path.to_path_buf(),
        kind: kind_name(&other),
      }),
    }
  }

  /// Number of build records in this manifest.
  pub(crate) fn len(&self) -> usize {
    match self {
      Self::Wrapped(records) | Self::List(records) => records.len(),
      Self::Single(_) => 1,
    }
  }

  /// The records in file order.
  pub fn into_records(self) -> Vec<BuildRecord> {
    match self {
      Self::Wrapped(records) | Self::List(records) => records,
      Self::Single(record) => vec![record],
    }
  }
}

fn records_from_array(path: &Path, items: Vec<Value>) -> Result<Vec<BuildRecord>> {
  items
    .into_iter()
    .enumerate()
    .map(|(index, item)| match item {
      Value::Object(record) => Ok(record),
      _ => Err(AggregateError::NonObjectRecord {
        path: path.to_path_buf(),
        index,
      }),
    })
    .collect()
}

fn kind_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "a list",
    Value::Object(_) => "an object",
  }
}
