//! Template content for `packstage init`.

/// Job file template. `{output_name}` is substituted at init time.
pub const JOB_TOML_TEMPLATE: &str = r#"# packstage job file
#
# Relative source_dir and destination_dir resolve against the directory
# packstage is run from. Every other path is relative to source_dir.

source_dir = "."
entry_point = "{output_name}.py"
output_name = "{output_name}"
# icon = "favicon.ico"
destination_dir = "staging"

# Files bundled inside the executable. Missing sources are skipped.
# [[embedded_data]]
# source = "favicon.ico"
# dest = "."

# Copied next to the executable after the build. Missing entries are skipped.
sidecar_files = []
# Directories replace any existing copy at the destination.
sidecar_dirs = []

# Reject an artifact older than the build that should have produced it.
check_freshness = true

[mode]
bundle = "onefile"   # or "onedir"
window = "console"   # or "windowed"

[dependencies]
# requirements = "requirements.txt"
packages = ["pyinstaller"]

[toolchain]
timeout_secs = 1800
# installer = { program = "python3", args = ["-m", "pip"] }
# freezer = { program = "python3", args = ["-m", "PyInstaller"] }
"#;
