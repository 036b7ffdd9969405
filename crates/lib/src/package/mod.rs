//! The packaging pipeline.
//!
//! A [`Packager`] takes one [`BuildJob`] through:
//! 1. resolving and validating the source directory (nothing is touched on failure)
//! 2. entering the source directory under a [`WorkingDirGuard`](crate::workdir::WorkingDirGuard)
//! 3. installing prerequisites
//! 4. freezing the entry point
//! 5. verifying and staging the artifact
//! 6. copying sidecars
//!
//! Each step runs only if the previous one succeeded, and every external
//! command runs exactly once.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;
use tracing::info;

use crate::error::PackageError;
use crate::job::{BuildJob, ResolvedJob};
use crate::stage::{SidecarReport, copy_sidecars, stage_artifact};
use crate::tool::{FreezeArgs, ensure_dependencies, install_commands, run_freeze};
use crate::workdir::with_working_directory;

/// Invocation-time overrides layered on top of a job file.
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
  /// Skip the dependency install step.
  pub skip_install: bool,
  /// Replace the job's per-tool timeout.
  pub timeout: Option<Duration>,
  /// Replace the job's destination directory.
  pub destination: Option<PathBuf>,
}

/// What a job would do, without doing it.
#[derive(Debug, Clone, Serialize)]
pub struct PackagePlan {
  pub working_dir: PathBuf,
  pub install: Vec<String>,
  pub freeze: String,
  pub artifact: PathBuf,
  pub destination_dir: PathBuf,
  pub sidecar_files: Vec<PathBuf>,
  pub sidecar_dirs: Vec<PathBuf>,
  pub timeout: Duration,
}

/// Result of a successful job.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
  pub output_name: String,
  /// Where the freezer left the artifact.
  pub artifact: PathBuf,
  /// Where the artifact was staged.
  pub staged: PathBuf,
  pub sidecars: SidecarReport,
  pub elapsed: Duration,
}

pub struct Packager {
  job: ResolvedJob,
  options: PackageOptions,
}

impl Packager {
  /// Apply `options` to `job` and resolve it against `base_dir`.
  pub fn prepare(mut job: BuildJob, base_dir: &Path, options: PackageOptions) -> Result<Self, PackageError> {
    if let Some(destination) = &options.destination {
      job.destination_dir = destination.clone();
    }

    let job = ResolvedJob::resolve(job, base_dir)?;
    Ok(Self { job, options })
  }

  pub fn job(&self) -> &ResolvedJob {
    &self.job
  }

  pub fn timeout(&self) -> Duration {
    self.options.timeout.unwrap_or_else(|| self.job.job.toolchain.timeout())
  }

  /// Describe the commands and copies [`run`](Self::run) would perform.
  pub fn plan(&self) -> PackagePlan {
    let job = &self.job.job;

    let install = if self.options.skip_install {
      Vec::new()
    } else {
      install_commands(&job.toolchain.installer, &job.dependencies)
        .iter()
        .map(ToString::to_string)
        .collect()
    };

    PackagePlan {
      working_dir: self.job.source_dir.clone(),
      install,
      freeze: FreezeArgs::for_job(&self.job).command(&job.toolchain.freezer).to_string(),
      artifact: self.job.artifact_source(),
      destination_dir: self.job.destination_dir.clone(),
      sidecar_files: job.sidecar_files.clone(),
      sidecar_dirs: job.sidecar_dirs.clone(),
      timeout: self.timeout(),
    }
  }

  /// Run the job to completion or to its first failure.
  ///
  /// The working directory is the same when this returns as when it was called.
  pub async fn run(&self) -> Result<PackageReport, PackageError> {
    let started = Instant::now();
    let job = &self.job;
    let options = &self.options;
    let timeout = self.timeout();
    let freeze_args = FreezeArgs::for_job(job);
    let freeze_args = &freeze_args;

    info!(name = %job.job.output_name, source = %job.source_dir.display(), "packaging");

    let (artifact, staged, sidecars) = with_working_directory(&job.source_dir, move || async move {
      let toolchain = &job.job.toolchain;

      if options.skip_install {
        info!("skipping dependency install");
      } else {
        ensure_dependencies(&toolchain.installer, &job.job.dependencies, timeout).await?;
      }

      let build_started = SystemTime::now();
      run_freeze(&toolchain.freezer, freeze_args, timeout).await?;

      let artifact = job.artifact_source();
      let fresh_since = job.job.check_freshness.then_some(build_started);
      let staged = stage_artifact(&artifact, &job.destination_dir, fresh_since)?;

      let sidecars = copy_sidecars(
        &job.source_dir,
        &job.job.sidecar_files,
        &job.job.sidecar_dirs,
        &job.destination_dir,
      )?;

      Ok::<_, PackageError>((artifact, staged, sidecars))
    })
    .await?;

    let report = PackageReport {
      output_name: job.job.output_name.clone(),
      artifact,
      staged,
      sidecars,
      elapsed: started.elapsed(),
    };

    info!(
      staged = %report.staged.display(),
      sidecars = report.sidecars.count_copied(),
      "packaging complete"
    );

    Ok(report)
  }
}

/// Package `job` relative to the current working directory.
pub async fn package(job: BuildJob, options: PackageOptions) -> Result<PackageReport, PackageError> {
  let base_dir = std::env::current_dir()?;
  Packager::prepare(job, &base_dir, options)?.run().await
}
