//! Plan command integration tests.

use predicates::prelude::*;

use super::common::{FREEZE_OK, TestEnv};

#[test]
fn plan_runs_no_tools() {
  let env = TestEnv::new();
  env.write_job("touch installed", "touch frozen", "");

  env
    .packstage_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("/bin/sh"));

  assert!(!env.path("proj/installed").exists());
  assert!(!env.path("proj/frozen").exists());
}

#[test]
fn plan_lists_requirements_before_packages() {
  let env = TestEnv::new();
  env.write_file("proj/requirements.txt", "");
  env.write_job(
    "exit 0",
    FREEZE_OK,
    "[dependencies]\nrequirements = \"requirements.txt\"\npackages = [\"pyinstaller\"]\n",
  );

  let output = env.packstage_cmd().args(["plan", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let install = plan["install"].as_array().unwrap();
  assert_eq!(install.len(), 2);
  assert!(install[0].as_str().unwrap().contains("install -r"));
  assert!(install[1].as_str().unwrap().ends_with("install pyinstaller"));
}
