//! Build command integration tests.

use predicates::prelude::*;

use super::common::{FREEZE_OK, TestEnv};

#[test]
fn build_stages_artifact_and_sidecars() {
  let env = TestEnv::new();
  env.write_file("proj/settings.ini", "[main]\n");
  env.write_file("proj/assets/icon.png", "png");
  env.write_job(
    "exit 0",
    FREEZE_OK,
    "sidecar_files = [\"settings.ini\", \"missing.txt\"]\nsidecar_dirs = [\"assets\"]",
  );

  env
    .packstage_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"))
    .stdout(predicate::str::contains("Sidecars copied: 2"))
    .stdout(predicate::str::contains("missing.txt"));

  assert_eq!(std::fs::read_to_string(env.path("out/app.exe")).unwrap(), "frozen\n");
  assert!(env.path("out/settings.ini").is_file());
  assert!(env.path("out/assets/icon.png").is_file());
}

#[test]
fn build_json_report() {
  let env = TestEnv::new();
  env.write_job("exit 0", FREEZE_OK, "");

  let output = env.packstage_cmd().args(["build", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["output_name"], "app");
  assert!(report["staged"].as_str().unwrap().ends_with("app.exe"));
}

#[test]
fn build_dest_override() {
  let env = TestEnv::new();
  env.write_job("exit 0", FREEZE_OK, "");

  env
    .packstage_cmd()
    .args(["build", "--dest", "elsewhere"])
    .assert()
    .success();

  assert!(env.path("elsewhere/app.exe").is_file());
  assert!(!env.path("out").exists());
}

#[test]
fn build_install_failure_exits_one() {
  let env = TestEnv::new();
  env.write_job("exit 3", "touch froze", "");

  env
    .packstage_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("dependency install failed"));

  assert!(!env.path("proj/froze").exists());
  assert!(!env.path("out").exists());
}

#[test]
fn build_skip_install() {
  let env = TestEnv::new();
  env.write_job("exit 3", FREEZE_OK, "");

  env
    .packstage_cmd()
    .args(["build", "--skip-install"])
    .assert()
    .success();

  assert!(env.path("out/app.exe").is_file());
}

#[test]
fn build_freeze_failure_exits_one() {
  let env = TestEnv::new();
  env.write_job("exit 0", "exit 1", "");

  env
    .packstage_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("freeze tool failed"));

  assert!(!env.path("out").exists());
}

#[test]
fn build_missing_artifact_exits_one() {
  let env = TestEnv::new();
  env.write_file("proj/settings.ini", "");
  env.write_job("exit 0", "exit 0", "sidecar_files = [\"settings.ini\"]");

  env
    .packstage_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("expected artifact was not produced"));

  assert!(!env.path("out/settings.ini").exists());
}

#[test]
fn build_timeout_exits_one() {
  let env = TestEnv::new();
  env.write_job("exit 0", "exec sleep 30", "");

  env
    .packstage_cmd()
    .args(["build", "--timeout", "1"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("timed out"));
}

#[test]
fn build_logs_tool_invocations() {
  let env = TestEnv::new();
  env.write_job("exit 0", FREEZE_OK, "");

  env
    .packstage_cmd()
    .arg("build")
    .assert()
    .success()
    .stderr(predicate::str::contains("--onefile"));

  assert!(env.path("out/app.exe").is_file());
}
