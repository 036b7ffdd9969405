//! Implementation of the `packstage init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use packstage_lib::init::{InitOptions, init};

use crate::output::symbols;

/// Execute the init command.
///
/// Writes a commented `packstage.toml` into `dir`.
///
/// # Errors
///
/// Returns an error if the job file already exists or cannot be written.
pub fn cmd_init(dir: &str, name: Option<String>) -> Result<()> {
  let options = InitOptions {
    dir: PathBuf::from(dir),
    name,
  };

  let result = init(&options).context("Failed to initialize job file")?;

  println!("{} {}", symbols::SUCCESS.green(), "Created job file".green().bold());
  println!();
  println!("  {} Job file:    {}", symbols::INFO.cyan(), result.job_file.display());
  println!("  {} Output name: {}", symbols::INFO.cyan(), result.output_name);
  println!();
  println!("{}", "Next steps:".bold());
  println!(
    "  1. Edit {} to point at your project",
    result.job_file.display().to_string().cyan()
  );
  println!(
    "  2. Run: {}",
    format!("packstage build {}", result.job_file.display()).cyan()
  );

  Ok(())
}
