//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

/// Revision passed via `--revision` so tests never depend on git.
pub const TEST_SHA: &str = "abcdef1234567890abcdef1234567890abcdef12";

/// Isolated test environment.
///
/// Each test gets its own temporary directory with a `dist` root inside it.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with an existing, empty `dist` directory.
  pub fn new() -> Self {
    let env = Self::without_dist();
    std::fs::create_dir_all(env.temp.path().join("dist")).unwrap();
    env
  }

  /// Create an environment where `dist` does not exist yet.
  pub fn without_dist() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Distribution root path.
  pub fn dist_path(&self) -> PathBuf {
    let p = self.temp.path().join("dist");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Path of the aggregate output.
  pub fn output_path(&self) -> PathBuf {
    self.dist_path().join("manifest.json")
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write `dist/<distribution>/manifest.json`.
  pub fn write_manifest(&self, distribution: &str, content: &Value) {
    self.write_file(
      &format!("dist/{}/manifest.json", distribution),
      &serde_json::to_string_pretty(content).unwrap(),
    );
  }

  /// Parse the aggregate written by the last run.
  pub fn read_output(&self) -> Value {
    let content = std::fs::read_to_string(self.output_path()).unwrap();
    serde_json::from_str(&content).unwrap()
  }

  /// Get a pre-configured Command for the distagg binary.
  ///
  /// Runs from the temp directory with the dist root as first argument and
  /// `RUST_LOG` cleared so log output doesn't depend on the caller.
  pub fn distagg_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("distagg");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd.arg(self.temp.path().join("dist"));
    cmd
  }
}
