//! Scoped working-directory changes.
//!
//! The process working directory is global state. [`WorkingDirGuard`] enters a
//! directory and puts the previous one back when dropped, so the original
//! directory is restored on success, on error, and while unwinding from a
//! panic.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::PackageError;

/// Holds the process inside a directory until dropped.
#[derive(Debug)]
pub struct WorkingDirGuard {
  previous: PathBuf,
}

impl WorkingDirGuard {
  /// Change into `dir`, remembering where the process was.
  pub fn enter(dir: &Path) -> Result<Self, PackageError> {
    let previous = std::env::current_dir()?;

    std::env::set_current_dir(dir).map_err(|e| PackageError::WorkingDirectory {
      path: dir.to_path_buf(),
      source: e,
    })?;

    debug!(from = %previous.display(), to = %dir.display(), "entered directory");

    Ok(Self { previous })
  }
}

impl Drop for WorkingDirGuard {
  fn drop(&mut self) {
    match std::env::set_current_dir(&self.previous) {
      Ok(()) => debug!(to = %self.previous.display(), "restored directory"),
      Err(e) => error!(
        path = %self.previous.display(),
        error = %e,
        "failed to restore working directory"
      ),
    }
  }
}

/// Run `body` with the process working directory set to `dir`.
///
/// The original directory is restored before this returns, whatever `body`
/// yields. If entering `dir` fails, `body` never runs.
pub async fn with_working_directory<F, Fut, T>(dir: &Path, body: F) -> Result<T, PackageError>
where
  F: FnOnce() -> Fut,
  Fut: Future<Output = Result<T, PackageError>>,
{
  let _guard = WorkingDirGuard::enter(dir)?;
  body().await
}
