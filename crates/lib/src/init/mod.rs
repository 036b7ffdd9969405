//! Scaffold a new job file.
//!
//! This module provides the core logic for the `packstage init` command,
//! which writes a commented `packstage.toml` into a project directory.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::DEFAULT_JOB_FILE;

pub use templates::JOB_TOML_TEMPLATE;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("invalid output name {name:?}: {reason}")]
  InvalidName { name: String, reason: &'static str },
}

/// Options for scaffolding a job file.
pub struct InitOptions {
  /// Directory to write the job file into
  pub dir: PathBuf,
  /// Output name for the executable; defaults to the directory name
  pub name: Option<String>,
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// Path to the created job file
  pub job_file: PathBuf,
  /// Output name written into the template
  pub output_name: String,
}

/// Write a template job file into `options.dir`.
///
/// # Errors
///
/// Returns an error if the job file already exists, if the output name
/// cannot be derived, or if writing fails.
pub fn init(options: &InitOptions) -> Result<InitResult, InitError> {
  let dir = &options.dir;

  fs::create_dir_all(dir).map_err(|e| InitError::CreateDir {
    path: dir.clone(),
    source: e,
  })?;

  let job_file = dir.join(DEFAULT_JOB_FILE);
  if job_file.exists() {
    return Err(InitError::PathExists { path: job_file });
  }

  let output_name = match &options.name {
    Some(name) => name.clone(),
    None => default_name(dir),
  };
  check_name(&output_name)?;

  let content = JOB_TOML_TEMPLATE.replace("{output_name}", &output_name);
  fs::write(&job_file, content).map_err(|e| InitError::WriteFile {
    path: job_file.clone(),
    source: e,
  })?;

  Ok(InitResult { job_file, output_name })
}

fn default_name(dir: &Path) -> String {
  dunce::canonicalize(dir)
    .ok()
    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
    .unwrap_or_else(|| "app".to_string())
}

fn check_name(name: &str) -> Result<(), InitError> {
  let reason = if name.trim().is_empty() {
    "must not be empty"
  } else if name.contains(['/', '\\']) {
    "must not contain path separators"
  } else if name.contains('"') {
    "must not contain quotes"
  } else {
    return Ok(());
  };

  Err(InitError::InvalidName {
    name: name.to_string(),
    reason,
  })
}
