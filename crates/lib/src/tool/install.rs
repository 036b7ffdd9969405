//! Package installer invocation.

use std::time::Duration;

use tracing::info;

use crate::error::PackageError;
use crate::job::Dependencies;
use crate::tool::{ToolCommand, ToolKind};

/// The installer invocations needed to satisfy `deps`, in execution order.
///
/// The requirements manifest comes first, then all named packages in a single
/// call. Returns an empty list when nothing is declared.
pub fn install_commands(installer: &ToolCommand, deps: &Dependencies) -> Vec<ToolCommand> {
  let mut commands = Vec::new();

  if let Some(requirements) = &deps.requirements {
    commands.push(installer.clone().arg("install").arg("-r").path_arg(requirements));
  }

  if !deps.packages.is_empty() {
    commands.push(installer.clone().arg("install").args(deps.packages.iter().cloned()));
  }

  commands
}

/// Install the job's prerequisites in the current working directory.
///
/// Stops at the first failing invocation.
pub async fn ensure_dependencies(
  installer: &ToolCommand,
  deps: &Dependencies,
  timeout: Duration,
) -> Result<(), PackageError> {
  let commands = install_commands(installer, deps);
  info!(count = commands.len(), "installing dependencies");

  for command in &commands {
    command.run(ToolKind::Installer, timeout).await?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  use crate::util::testutil::shell_cmd;

  fn pip() -> ToolCommand {
    ToolCommand::new("python3").args(["-m", "pip"])
  }

  #[test]
  fn manifest_installs_before_packages() {
    let deps = Dependencies {
      requirements: Some(PathBuf::from("requirements.txt")),
      packages: vec!["pyinstaller".to_string()],
    };

    let commands = install_commands(&pip(), &deps);

    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].args, vec!["-m", "pip", "install", "-r", "requirements.txt"]);
    assert_eq!(commands[1].args, vec!["-m", "pip", "install", "pyinstaller"]);
  }

  #[test]
  fn packages_share_one_invocation() {
    let deps = Dependencies {
      requirements: None,
      packages: vec!["pyinstaller".to_string(), "pefile".to_string()],
    };

    let commands = install_commands(&pip(), &deps);

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].to_string(), "python3 -m pip install pyinstaller pefile");
  }

  #[test]
  fn nothing_declared_means_nothing_to_run() {
    let deps = Dependencies {
      requirements: None,
      packages: Vec::new(),
    };
    assert!(install_commands(&pip(), &deps).is_empty());
  }

  #[tokio::test]
  async fn failing_installer_is_fatal() {
    let (program, args) = shell_cmd("exit 1");
    let installer = ToolCommand::new(program).args(args);

    let err = ensure_dependencies(&installer, &Dependencies::default(), Duration::from_secs(30))
      .await
      .unwrap_err();

    assert!(matches!(err, PackageError::ToolInstall { code: Some(1), .. }));
  }
}
