//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Freezer script that writes a one-file artifact.
pub const FREEZE_OK: &str = "mkdir -p dist && echo frozen > dist/app.exe";

/// Isolated test environment.
///
/// Holds a project directory `proj/` with an entry point, and runs the
/// binary from the temp root so relative job paths resolve inside it.
pub struct TestEnv {
  pub temp: TempDir,
  pub job_path: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let job_path = temp.path().join("packstage.toml");
    let env = Self { temp, job_path };
    env.write_file("proj/app.py", "print('hi')\n");
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write the job file with the given installer and freezer scripts.
  ///
  /// `extra` is appended verbatim before the `[toolchain]` table.
  pub fn write_job(&self, install_script: &str, freeze_script: &str, extra: &str) {
    let content = format!(
      r#"source_dir = "proj"
entry_point = "app.py"
output_name = "app"
destination_dir = "out"
artifact = "dist/app.exe"
{extra}

[toolchain]
timeout_secs = 30
installer = {{ program = "/bin/sh", args = ["-c", '{install_script}', "tool"] }}
freezer = {{ program = "/bin/sh", args = ["-c", '{freeze_script}', "tool"] }}
"#
    );
    std::fs::write(&self.job_path, content).unwrap();
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Get a Command for the packstage binary, run from the temp root.
  pub fn packstage_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("packstage");
    cmd.current_dir(self.temp.path());
    cmd.env("RUST_LOG", "packstage_lib=debug");
    cmd
  }
}
