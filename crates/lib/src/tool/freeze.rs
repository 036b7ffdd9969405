//! Freezer invocation.
//!
//! [`FreezeArgs`] turns a job into the exact flag list passed to the freezer.
//! The list is deterministic: the same job always yields the same arguments in
//! the same order, and the freezer is never allowed to prompt.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::consts::ADD_DATA_SEPARATOR;
use crate::error::PackageError;
use crate::job::{Bundle, EmbeddedData, FreezeMode, ResolvedJob, Window};
use crate::tool::{ToolCommand, ToolKind};

/// Typed freezer arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeArgs {
  pub entry_point: PathBuf,
  pub output_name: String,
  pub icon: Option<PathBuf>,
  pub embedded_data: Vec<EmbeddedData>,
  pub mode: FreezeMode,
}

impl FreezeArgs {
  pub fn new(entry_point: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
    Self {
      entry_point: entry_point.into(),
      output_name: output_name.into(),
      icon: None,
      embedded_data: Vec::new(),
      mode: FreezeMode::default(),
    }
  }

  pub fn icon(mut self, icon: impl Into<PathBuf>) -> Self {
    self.icon = Some(icon.into());
    self
  }

  pub fn embed(mut self, data: EmbeddedData) -> Self {
    self.embedded_data.push(data);
    self
  }

  pub fn mode(mut self, mode: FreezeMode) -> Self {
    self.mode = mode;
    self
  }

  /// Build the arguments for a resolved job.
  ///
  /// Embedded data whose source is missing from the project is dropped with a
  /// warning rather than handed to the freezer.
  pub fn for_job(job: &ResolvedJob) -> Self {
    let mut args = FreezeArgs::new(&job.job.entry_point, &job.job.output_name).mode(job.job.mode);

    if let Some(icon) = &job.job.icon {
      if job.source_path(icon).is_file() {
        args = args.icon(icon);
      } else {
        warn!(path = %icon.display(), "icon not found, building without one");
      }
    }

    for data in &job.job.embedded_data {
      if job.source_path(&data.source).exists() {
        args = args.embed(data.clone());
      } else {
        warn!(path = %data.source.display(), "embedded data not found, skipping");
      }
    }

    args
  }

  /// Render the flag list, entry point last.
  pub fn to_args(&self) -> Vec<String> {
    let mut args = vec!["--noconfirm".to_string()];

    args.push(
      match self.mode.bundle {
        Bundle::OneFile => "--onefile",
        Bundle::OneDir => "--onedir",
      }
      .to_string(),
    );
    args.push(
      match self.mode.window {
        Window::Console => "--console",
        Window::Windowed => "--windowed",
      }
      .to_string(),
    );

    args.push(format!("--name={}", self.output_name));

    if let Some(icon) = &self.icon {
      args.push(format!("--icon={}", icon.display()));
    }

    for data in &self.embedded_data {
      args.push(format!(
        "--add-data={}{}{}",
        data.source.display(),
        ADD_DATA_SEPARATOR,
        data.dest
      ));
    }

    args.push(self.entry_point.to_string_lossy().into_owned());
    args
  }

  /// The full freezer command line for a given freezer prefix.
  pub fn command(&self, freezer: &ToolCommand) -> ToolCommand {
    freezer.clone().args(self.to_args())
  }
}

/// Run the freezer in the current working directory.
pub async fn run_freeze(freezer: &ToolCommand, args: &FreezeArgs, timeout: Duration) -> Result<(), PackageError> {
  info!(entry_point = %args.entry_point.display(), name = %args.output_name, "freezing");
  args.command(freezer).run(ToolKind::Freezer, timeout).await
}
