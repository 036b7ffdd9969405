//! packstage-lib: freeze a project into an executable and stage the result.
//!
//! This crate provides the pieces of a packaging job:
//! - `BuildJob`: what to build and where the outputs go, loaded from TOML
//! - `WorkingDirGuard`: scoped entry into the project directory
//! - `ToolCommand` / `FreezeArgs`: typed invocations of the installer and freezer
//! - `Packager`: the pipeline tying them together

pub mod consts;
pub mod error;
pub mod init;
pub mod job;
pub mod package;
pub mod stage;
pub mod tool;
pub mod util;
pub mod workdir;

pub use error::PackageError;
pub use job::{BuildJob, ResolvedJob, load_job_file};
pub use package::{PackageOptions, PackagePlan, PackageReport, Packager, package};
