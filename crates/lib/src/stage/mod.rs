//! Staging build outputs into the destination directory.
//!
//! The artifact is mandatory: if it is missing (or stale) the job fails.
//! Sidecars are best-effort: anything absent from the source is skipped.

mod copy;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::PackageError;

pub use copy::{copy_file_with_metadata, replace_dir};

/// Outcome of copying sidecars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidecarReport {
  /// Destination paths that were written.
  pub copied: Vec<PathBuf>,
  /// Sidecars named by the job but absent from the source.
  pub skipped: Vec<PathBuf>,
}

impl SidecarReport {
  pub fn count_copied(&self) -> usize {
    self.copied.len()
  }
}

/// Verify the freezer's output and copy it into `destination_dir`.
///
/// With `built_after` set, an artifact last modified before that instant is
/// rejected as left over from an earlier build. Times are compared at
/// whole-second resolution with one second of slack, since filesystem
/// timestamps can trail the system clock.
///
/// Returns the staged path.
pub fn stage_artifact(
  artifact: &Path,
  destination_dir: &Path,
  built_after: Option<SystemTime>,
) -> Result<PathBuf, PackageError> {
  let metadata = fs::metadata(artifact).map_err(|_| PackageError::ArtifactMissing {
    path: artifact.to_path_buf(),
  })?;

  if let Some(started) = built_after {
    let modified = metadata.modified()?;
    if unix_secs(modified) + 1 < unix_secs(started) {
      return Err(PackageError::StaleArtifact {
        path: artifact.to_path_buf(),
      });
    }
  }

  let name = artifact.file_name().ok_or_else(|| PackageError::ArtifactMissing {
    path: artifact.to_path_buf(),
  })?;
  let target = destination_dir.join(name);

  ensure_dir(destination_dir)?;

  let copied = if metadata.is_dir() {
    replace_dir(artifact, &target)
  } else {
    copy_file_with_metadata(artifact, &target)
  };
  copied.map_err(|e| PackageError::Copy {
    from: artifact.to_path_buf(),
    to: target.clone(),
    source: e,
  })?;

  info!(path = %target.display(), "staged artifact");
  Ok(target)
}

/// Copy sidecar files and directories from `source_dir` into `destination_dir`.
///
/// Files overwrite same-named files at the destination. Directories replace
/// same-named directories wholesale. Missing sidecars are recorded in the
/// report and otherwise ignored.
pub fn copy_sidecars(
  source_dir: &Path,
  files: &[PathBuf],
  dirs: &[PathBuf],
  destination_dir: &Path,
) -> Result<SidecarReport, PackageError> {
  let mut report = SidecarReport::default();

  for file in files {
    let src = source_dir.join(file);
    if !src.is_file() {
      debug!(path = %file.display(), "sidecar file not found, skipping");
      report.skipped.push(file.clone());
      continue;
    }

    let dst = destination_dir.join(sidecar_name(file)?);
    ensure_dir(destination_dir)?;
    copy_file_with_metadata(&src, &dst).map_err(|e| PackageError::Copy {
      from: src.clone(),
      to: dst.clone(),
      source: e,
    })?;

    info!(path = %dst.display(), "copied sidecar");
    report.copied.push(dst);
  }

  for dir in dirs {
    let src = source_dir.join(dir);
    if !src.is_dir() {
      debug!(path = %dir.display(), "sidecar directory not found, skipping");
      report.skipped.push(dir.clone());
      continue;
    }

    let dst = destination_dir.join(sidecar_name(dir)?);
    ensure_dir(destination_dir)?;
    replace_dir(&src, &dst).map_err(|e| PackageError::Copy {
      from: src.clone(),
      to: dst.clone(),
      source: e,
    })?;

    info!(path = %dst.display(), "copied sidecar directory");
    report.copied.push(dst);
  }

  Ok(report)
}

/// Sidecars land flat in the destination under their final path component.
fn sidecar_name(path: &Path) -> Result<&std::ffi::OsStr, PackageError> {
  path
    .file_name()
    .ok_or_else(|| PackageError::InvalidJob(format!("sidecar path has no file name: {}", path.display())))
}

fn ensure_dir(dir: &Path) -> Result<(), PackageError> {
  fs::create_dir_all(dir).map_err(|e| PackageError::Copy {
    from: dir.to_path_buf(),
    to: dir.to_path_buf(),
    source: e,
  })
}

fn unix_secs(time: SystemTime) -> u64 {
  time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
