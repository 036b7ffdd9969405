/// Job file looked up when none is given on the command line.
pub const DEFAULT_JOB_FILE: &str = "packstage.toml";

/// Directory the freezer writes its outputs to, relative to the source directory.
pub const FREEZE_DIST_DIR: &str = "dist";

/// Upper bound on a single external tool invocation.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30 * 60;

/// Interpreter that hosts both the package installer and the freezer.
#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";

#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Environment variable that overrides [`DEFAULT_PYTHON`] for the default toolchain.
pub const PYTHON_ENV_VAR: &str = "PACKSTAGE_PYTHON";

/// Separator between source and destination in a freezer `--add-data` value.
#[cfg(windows)]
pub const ADD_DATA_SEPARATOR: char = ';';

#[cfg(not(windows))]
pub const ADD_DATA_SEPARATOR: char = ':';
