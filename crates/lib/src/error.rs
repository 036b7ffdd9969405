//! Error types for packaging jobs.
//!
//! Every variant is fatal to the job that raised it. Variants carry the path
//! or command line needed to diagnose the failure from the message alone.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while running a packaging job.
#[derive(Debug, Error)]
pub enum PackageError {
  /// The project directory to build does not exist.
  #[error("source directory not found: {}", path.display())]
  SourceNotFound { path: PathBuf },

  /// The job definition is not usable as written.
  #[error("invalid job: {0}")]
  InvalidJob(String),

  /// The script handed to the freezer is missing from the source directory.
  #[error("entry point not found: {}", path.display())]
  EntryPointNotFound { path: PathBuf },

  /// The package installer exited non-zero.
  #[error("dependency install failed with exit code {code:?}: {cmd}")]
  ToolInstall { cmd: String, code: Option<i32> },

  /// The freezer exited non-zero.
  #[error("freeze tool failed with exit code {code:?}: {cmd}")]
  FreezeTool { cmd: String, code: Option<i32> },

  /// An external tool ran past its deadline and was killed.
  #[error("command timed out after {}s: {cmd}", timeout.as_secs())]
  ToolTimeout { cmd: String, timeout: Duration },

  /// An external tool could not be started at all.
  #[error("failed to start {cmd}: {source}")]
  ToolSpawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// The freezer reported success but left no artifact behind.
  #[error("expected artifact was not produced: {}", path.display())]
  ArtifactMissing { path: PathBuf },

  /// The artifact predates this build, so it was left over from an earlier run.
  #[error("artifact is older than the current build: {}", path.display())]
  StaleArtifact { path: PathBuf },

  /// Copying an output into the destination failed.
  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Entering the source directory failed.
  #[error("failed to change working directory to {}: {source}", path.display())]
  WorkingDirectory {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Anything not covered above.
  #[error("unexpected error: {0}")]
  Unexpected(#[from] std::io::Error),
}

impl PackageError {
  /// Whether the error was raised by an external tool rather than by the packager itself.
  pub fn is_tool_failure(&self) -> bool {
    matches!(
      self,
      PackageError::ToolInstall { .. }
        | PackageError::FreezeTool { .. }
        | PackageError::ToolTimeout { .. }
        | PackageError::ToolSpawn { .. }
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_offending_path() {
    let err = PackageError::SourceNotFound {
      path: PathBuf::from("../proj"),
    };
    assert_eq!(err.to_string(), "source directory not found: ../proj");

    let err = PackageError::ArtifactMissing {
      path: PathBuf::from("dist/app.exe"),
    };
    assert!(err.to_string().contains("dist/app.exe"));
  }

  #[test]
  fn timeout_message_reports_seconds() {
    let err = PackageError::ToolTimeout {
      cmd: "python -m PyInstaller app.py".to_string(),
      timeout: Duration::from_secs(90),
    };
    assert_eq!(err.to_string(), "command timed out after 90s: python -m PyInstaller app.py");
  }

  #[test]
  fn tool_failures_are_classified() {
    let install = PackageError::ToolInstall {
      cmd: "pip install".to_string(),
      code: Some(1),
    };
    let missing = PackageError::ArtifactMissing {
      path: PathBuf::from("dist/app"),
    };
    assert!(install.is_tool_failure());
    assert!(!missing.is_tool_failure());
  }
}
