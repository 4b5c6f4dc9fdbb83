//! Fatal error paths: non-zero exit, message on stderr, no output written.

use predicates::prelude::*;
use serde_json::json;

use super::common::{TEST_SHA, TestEnv};

#[test]
fn strict_empty_root_fails() {
  let env = TestEnv::new();

  env
    .distagg_cmd()
    .args(["--mode", "strict"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("nothing to aggregate"));

  assert!(!env.output_path().exists());
}

#[test]
fn strict_missing_root_fails() {
  let env = TestEnv::without_dist();

  env
    .distagg_cmd()
    .args(["--mode", "strict"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("does not exist"));

  assert!(!env.temp.path().join("dist").exists());
}

#[test]
fn non_list_builds_fails_naming_file() {
  let env = TestEnv::new();
  env.write_manifest("good", &json!({ "name": "fw" }));
  env.write_manifest("oops", &json!({ "builds": "oops" }));

  env
    .distagg_cmd()
    .args(["--revision", TEST_SHA])
    .assert()
    .failure()
    .stderr(predicate::str::contains("non-list 'builds'"))
    .stderr(predicate::str::contains("manifest.json"));

  assert!(!env.output_path().exists());
}

#[test]
fn invalid_json_fails() {
  let env = TestEnv::new();
  env.write_file("dist/broken/manifest.json", "{ \"name\": ");

  env
    .distagg_cmd()
    .args(["--revision", TEST_SHA])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn scalar_manifest_fails() {
  let env = TestEnv::new();
  env.write_file("dist/weird/manifest.json", "42");

  env
    .distagg_cmd()
    .args(["--revision", TEST_SHA])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported manifest format"));
}

#[test]
fn required_revision_outside_repository_fails() {
  let env = TestEnv::new();
  env.write_manifest("a", &json!({ "name": "fw" }));

  env
    .distagg_cmd()
    .arg("--repo")
    .arg(env.temp.path().join("not-a-repo"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to determine source revision"));

  assert!(!env.output_path().exists());
}

#[test]
fn dist_path_is_a_file() {
  let env = TestEnv::without_dist();
  env.write_file("dist", "");

  env
    .distagg_cmd()
    .args(["--revision", TEST_SHA])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a directory"));
}
