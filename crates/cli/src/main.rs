mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packstage_lib::consts::DEFAULT_JOB_FILE;

use crate::cmd::{BuildArgs, cmd_build, cmd_init, cmd_plan};
use crate::output::{OutputFormat, print_error};

/// packstage - freeze a project into an executable and stage it
#[derive(Parser)]
#[command(name = "packstage")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (overridden by RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the executable and stage it with its sidecars
  Build {
    /// Path to the job file
    #[arg(default_value = DEFAULT_JOB_FILE)]
    job: String,

    /// Skip installing dependencies
    #[arg(long)]
    skip_install: bool,

    /// Per-tool timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Stage into this directory instead of the job's destination
    #[arg(long, value_name = "DIR")]
    dest: Option<String>,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show the commands a build would run, without running them
  Plan {
    /// Path to the job file
    #[arg(default_value = DEFAULT_JOB_FILE)]
    job: String,

    /// Skip installing dependencies
    #[arg(long)]
    skip_install: bool,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Write a template job file
  Init {
    /// Directory to write the job file into
    #[arg(default_value = ".")]
    dir: String,

    /// Output name for the executable (defaults to the directory name)
    #[arg(long)]
    name: Option<String>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      job,
      skip_install,
      timeout,
      dest,
      output,
    } => cmd_build(
      &job,
      BuildArgs {
        skip_install,
        timeout,
        dest,
      },
      output,
    ),
    Commands::Plan {
      job,
      skip_install,
      output,
    } => cmd_plan(&job, skip_install, output),
    Commands::Init { dir, name } => cmd_init(&dir, name),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
