//! Job loading and resolution.
//!
//! Job files are TOML documents describing a single [`BuildJob`]. Before a job
//! runs it is resolved against the invoking directory into a [`ResolvedJob`],
//! which pins the absolute source and destination directories so that later
//! working-directory changes cannot move them.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::error::PackageError;

pub use types::{BuildJob, Bundle, Dependencies, EmbeddedData, FreezeMode, Toolchain, Window};

/// Errors that can occur while reading a job file.
#[derive(Debug, Error)]
pub enum JobFileError {
  #[error("job file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read job file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse job file {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },
}

/// Read and parse a job file.
pub fn load_job_file(path: &Path) -> Result<BuildJob, JobFileError> {
  if !path.exists() {
    return Err(JobFileError::NotFound {
      path: path.to_path_buf(),
    });
  }

  let content = fs::read_to_string(path).map_err(|e| JobFileError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  let job = toml::from_str(&content).map_err(|e| JobFileError::Parse {
    path: path.to_path_buf(),
    source: e,
  })?;

  debug!(path = %path.display(), "loaded job file");
  Ok(job)
}

/// Check that the project directory exists, returning its absolute path.
///
/// Runs before any state is touched, so a failure here leaves the working
/// directory and the destination untouched.
pub fn validate_source(source_dir: &Path) -> Result<PathBuf, PackageError> {
  if !source_dir.is_dir() {
    return Err(PackageError::SourceNotFound {
      path: source_dir.to_path_buf(),
    });
  }

  dunce::canonicalize(source_dir).map_err(|_| PackageError::SourceNotFound {
    path: source_dir.to_path_buf(),
  })
}

/// A job whose directories have been pinned to absolute paths.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
  pub job: BuildJob,
  /// Absolute, canonical project directory.
  pub source_dir: PathBuf,
  /// Absolute destination directory. May not exist yet.
  pub destination_dir: PathBuf,
}

impl ResolvedJob {
  /// Resolve `job` against `base_dir` and validate it.
  ///
  /// Checks, in order: the source directory exists, the output name is a
  /// plain file name, every sidecar path names a file or directory, and the
  /// entry point exists inside the source directory.
  pub fn resolve(job: BuildJob, base_dir: &Path) -> Result<Self, PackageError> {
    let source_dir = validate_source(&base_dir.join(&job.source_dir))?;
    validate_output_name(&job.output_name)?;
    validate_sidecars(&job)?;

    let entry_point = source_dir.join(&job.entry_point);
    if !entry_point.is_file() {
      return Err(PackageError::EntryPointNotFound { path: entry_point });
    }

    let destination_dir = base_dir.join(&job.destination_dir);
    let destination_dir = dunce::canonicalize(&destination_dir).unwrap_or(destination_dir);

    debug!(
      source = %source_dir.display(),
      destination = %destination_dir.display(),
      "resolved job"
    );

    Ok(Self {
      job,
      source_dir,
      destination_dir,
    })
  }

  /// Absolute path of a file named relative to the source directory.
  pub fn source_path(&self, relative: &Path) -> PathBuf {
    self.source_dir.join(relative)
  }

  /// Absolute path where the freezer is expected to leave its output.
  pub fn artifact_source(&self) -> PathBuf {
    self.source_path(&self.job.artifact_path())
  }
}

fn validate_output_name(name: &str) -> Result<(), PackageError> {
  if name.trim().is_empty() {
    return Err(PackageError::InvalidJob("output_name must not be empty".to_string()));
  }
  if name == "." || name == ".." || name.contains(['/', '\\']) {
    return Err(PackageError::InvalidJob(format!(
      "output_name must be a plain file name, got {:?}",
      name
    )));
  }
  Ok(())
}

/// Sidecars are staged under their final path component, so each needs one.
fn validate_sidecars(job: &BuildJob) -> Result<(), PackageError> {
  for path in job.sidecar_files.iter().chain(&job.sidecar_dirs) {
    if path.file_name().is_none() {
      return Err(PackageError::InvalidJob(format!(
        "sidecar path has no file name: {}",
        path.display()
      )));
    }
  }
  Ok(())
}
