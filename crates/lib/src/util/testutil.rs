//! Test utilities for packstage-lib.
//!
//! Tests stand in for the installer and freezer with small shell scripts, so
//! these helpers return a program plus arguments that run a script portably.

/// Returns the shell command and args to execute a shell script.
///
/// Extra arguments appended after these become positional parameters of the
/// script and are otherwise ignored, which lets a script replace a tool that
/// is invoked with a long flag list.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string(), "tool".to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}
