//! Implementation of the `packstage build` command.
//!
//! Loads a job file, runs the packaging pipeline, and prints what was staged.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use packstage_lib::{PackageOptions, load_job_file, package};

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

/// Command-line overrides for a build.
pub struct BuildArgs {
  pub skip_install: bool,
  pub timeout: Option<u64>,
  pub dest: Option<String>,
}

/// Execute the build command.
///
/// Any failure, from a missing job file to a missing artifact, is returned
/// as an error and turns into exit code 1.
pub fn cmd_build(file: &str, args: BuildArgs, output: OutputFormat) -> Result<()> {
  let job = load_job_file(Path::new(file)).context("Failed to load job")?;
  let name = job.output_name.clone();
  debug!(file, name = %name, "loaded job");

  let options = PackageOptions {
    skip_install: args.skip_install,
    timeout: args.timeout.map(Duration::from_secs),
    destination: args.dest.map(PathBuf::from),
  };

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let report = match rt.block_on(package(job, options)) {
    Ok(report) => report,
    Err(e) => {
      if e.is_tool_failure() && !output.is_json() {
        print_info("The tool's own output above shows the cause");
      }
      return Err(anyhow::Error::new(e).context(format!("Build of {} failed", name)));
    }
  };

  if output.is_json() {
    return print_json(&report);
  }

  println!();
  print_success("Build complete!");
  print_stat("Executable", &report.staged.display().to_string());
  print_stat("Sidecars copied", &report.sidecars.count_copied().to_string());
  if !report.sidecars.skipped.is_empty() {
    let skipped: Vec<_> = report.sidecars.skipped.iter().map(|p| p.display().to_string()).collect();
    print_stat("Sidecars skipped", &skipped.join(", "));
  }
  print_stat("Duration", &format_duration(report.elapsed));

  if let Some(dir) = report.staged.parent() {
    print_info(&format!("Outputs staged in {}", dir.display()));
  }

  Ok(())
}
