//! Implementation of the `packstage plan` command.
//!
//! Resolves and validates a job file, then prints the commands a build would
//! run and where its outputs would land. Nothing is executed or written.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use packstage_lib::{PackageOptions, Packager, load_job_file};

use crate::output::{OutputFormat, format_duration, print_json, print_stat, symbols};

pub fn cmd_plan(file: &str, skip_install: bool, output: OutputFormat) -> Result<()> {
  let job = load_job_file(Path::new(file)).context("Failed to load job")?;

  let base_dir = std::env::current_dir().context("Failed to read current directory")?;
  let options = PackageOptions {
    skip_install,
    ..Default::default()
  };
  let packager = Packager::prepare(job, &base_dir, options).context("Invalid job")?;
  let plan = packager.plan();

  if output.is_json() {
    return print_json(&plan);
  }

  println!("Plan: {}", packager.job().job.output_name.bold());
  print_stat("Working directory", &plan.working_dir.display().to_string());
  print_stat("Timeout", &format_duration(plan.timeout));
  println!();

  println!("Commands:");
  for cmd in plan.install.iter().chain(std::iter::once(&plan.freeze)) {
    println!("  {} {}", symbols::ARROW.cyan(), cmd);
  }
  println!();

  println!("Staging into {}:", plan.destination_dir.display());
  println!("  {} {}", symbols::ARROW.cyan(), plan.artifact.display());
  for path in plan.sidecar_files.iter().chain(&plan.sidecar_dirs) {
    println!("  {} {}", symbols::ARROW.cyan(), path.display());
  }

  Ok(())
}
