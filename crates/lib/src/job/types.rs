//! Job definition types.
//!
//! A [`BuildJob`] is the parsed form of a job file. It is constructed fresh
//! for every invocation and never written back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PYTHON, DEFAULT_TOOL_TIMEOUT_SECS, FREEZE_DIST_DIR, PYTHON_ENV_VAR};
use crate::tool::ToolCommand;

/// Everything needed to freeze one project and stage its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildJob {
  /// Project to build. Relative paths resolve against the invoking directory.
  pub source_dir: PathBuf,

  /// Script handed to the freezer, relative to `source_dir`.
  pub entry_point: PathBuf,

  /// Base name of the produced executable.
  pub output_name: String,

  /// Icon embedded into the executable, relative to `source_dir`.
  #[serde(default)]
  pub icon: Option<PathBuf>,

  /// Receives the artifact and sidecars. Relative paths resolve against the invoking directory.
  #[serde(default = "default_destination")]
  pub destination_dir: PathBuf,

  /// Files bundled inside the executable, in the order given.
  #[serde(default)]
  pub embedded_data: Vec<EmbeddedData>,

  /// Files copied next to the executable after the build.
  #[serde(default)]
  pub sidecar_files: Vec<PathBuf>,

  /// Directories copied next to the executable after the build, replacing any existing copy.
  #[serde(default)]
  pub sidecar_dirs: Vec<PathBuf>,

  /// Overrides the artifact location, relative to `source_dir`.
  #[serde(default)]
  pub artifact: Option<PathBuf>,

  #[serde(default)]
  pub mode: FreezeMode,

  #[serde(default)]
  pub dependencies: Dependencies,

  #[serde(default)]
  pub toolchain: Toolchain,

  /// Reject an artifact whose modification time predates the build.
  #[serde(default = "default_true")]
  pub check_freshness: bool,
}

impl BuildJob {
  /// Create a job with defaults for everything but the required fields.
  pub fn new(source_dir: impl Into<PathBuf>, entry_point: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
    Self {
      source_dir: source_dir.into(),
      entry_point: entry_point.into(),
      output_name: output_name.into(),
      icon: None,
      destination_dir: default_destination(),
      embedded_data: Vec::new(),
      sidecar_files: Vec::new(),
      sidecar_dirs: Vec::new(),
      artifact: None,
      mode: FreezeMode::default(),
      dependencies: Dependencies::default(),
      toolchain: Toolchain::default(),
      check_freshness: true,
    }
  }

  /// Location of the freezer's output, relative to `source_dir`.
  ///
  /// One-file builds produce `dist/<name><exe suffix>`; one-dir builds
  /// produce the directory `dist/<name>`.
  pub fn artifact_path(&self) -> PathBuf {
    if let Some(artifact) = &self.artifact {
      return artifact.clone();
    }

    let dist = Path::new(FREEZE_DIST_DIR);
    match self.mode.bundle {
      Bundle::OneFile => dist.join(format!("{}{}", self.output_name, std::env::consts::EXE_SUFFIX)),
      Bundle::OneDir => dist.join(&self.output_name),
    }
  }
}

/// A file or directory bundled into the executable archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddedData {
  /// Path on disk, relative to `source_dir`.
  pub source: PathBuf,
  /// Destination inside the archive.
  #[serde(default = "default_archive_dest")]
  pub dest: String,
}

impl EmbeddedData {
  pub fn new(source: impl Into<PathBuf>, dest: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      dest: dest.into(),
    }
  }
}

/// Output layout and window behavior of the frozen executable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreezeMode {
  #[serde(default)]
  pub bundle: Bundle,
  #[serde(default)]
  pub window: Window,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bundle {
  /// A single self-extracting executable.
  #[default]
  OneFile,
  /// A directory holding the executable and its libraries.
  OneDir,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
  /// Attach a console so command-line arguments and output pass through.
  #[default]
  Console,
  Windowed,
}

/// Prerequisites installed before freezing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependencies {
  /// Requirements manifest, relative to `source_dir`. Installed first.
  #[serde(default)]
  pub requirements: Option<PathBuf>,
  /// Individually named packages, installed after the manifest.
  #[serde(default = "default_packages")]
  pub packages: Vec<String>,
}

impl Default for Dependencies {
  fn default() -> Self {
    Self {
      requirements: None,
      packages: default_packages(),
    }
  }
}

/// External programs used by a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Toolchain {
  /// Installer prefix; `install <requirement>` is appended per invocation.
  #[serde(default = "default_installer")]
  pub installer: ToolCommand,
  /// Freezer prefix; the freeze flags and entry point are appended.
  #[serde(default = "default_freezer")]
  pub freezer: ToolCommand,
  /// Deadline for each individual tool invocation.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Toolchain {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      installer: default_installer(),
      freezer: default_freezer(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_destination() -> PathBuf {
  PathBuf::from(".")
}

fn default_archive_dest() -> String {
  ".".to_string()
}

fn default_true() -> bool {
  true
}

fn default_packages() -> Vec<String> {
  vec!["pyinstaller".to_string()]
}

/// Interpreter for the default toolchain: `$PACKSTAGE_PYTHON` if set and non-empty.
fn python_program() -> String {
  std::env::var(PYTHON_ENV_VAR)
    .ok()
    .filter(|p| !p.is_empty())
    .unwrap_or_else(|| DEFAULT_PYTHON.to_string())
}

fn default_installer() -> ToolCommand {
  ToolCommand::new(python_program()).arg("-m").arg("pip")
}

fn default_freezer() -> ToolCommand {
  ToolCommand::new(python_program()).arg("-m").arg("PyInstaller")
}

fn default_timeout_secs() -> u64 {
  DEFAULT_TOOL_TIMEOUT_SECS
}
