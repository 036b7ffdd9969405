//! External tool invocation.
//!
//! Tools are described by a [`ToolCommand`]: a program plus an argument list
//! built one typed argument at a time. Nothing is passed through a shell, so
//! paths with spaces or quotes reach the tool unchanged.
//!
//! - [`install`] - package installer invocations
//! - [`freeze`] - freezer argument builder and invocation

pub mod freeze;
pub mod install;

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::PackageError;

pub use freeze::{FreezeArgs, run_freeze};
pub use install::{ensure_dependencies, install_commands};

/// Which step an invocation belongs to. Decides how a non-zero exit is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
  Installer,
  Freezer,
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCommand {
  pub program: String,
  #[serde(default)]
  pub args: Vec<String>,
}

impl ToolCommand {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Append a path argument, keeping its platform form.
  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy())
  }

  /// Run the command in the current working directory.
  ///
  /// The tool's output goes to stderr so stdout stays free for reports; only
  /// the exit status is inspected. The child is killed if it outlives `timeout`.
  pub async fn run(&self, kind: ToolKind, timeout: Duration) -> Result<(), PackageError> {
    let cmd = self.to_string();
    info!(cmd = %cmd, "running");

    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .stdin(Stdio::null())
      .stdout(std::io::stderr())
      .kill_on_drop(true);

    let mut child = command.spawn().map_err(|e| PackageError::ToolSpawn {
      cmd: cmd.clone(),
      source: e,
    })?;

    let waited = tokio::time::timeout(timeout, child.wait()).await;
    let status = match waited {
      Ok(status) => status?,
      Err(_) => {
        // Reap before reporting so the next step never overlaps a dying child.
        let _ = child.kill().await;
        return Err(PackageError::ToolTimeout { cmd, timeout });
      }
    };

    debug!(cmd = %cmd, code = ?status.code(), "finished");

    if status.success() {
      return Ok(());
    }

    let code = status.code();
    Err(match kind {
      ToolKind::Installer => PackageError::ToolInstall { cmd, code },
      ToolKind::Freezer => PackageError::FreezeTool { cmd, code },
    })
  }
}

impl fmt::Display for ToolCommand {
  /// Renders the command line, quoting arguments that contain whitespace.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

fn quote(s: &str) -> String {
  if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"') {
    format!("{:?}", s)
  } else {
    s.to_string()
  }
}
