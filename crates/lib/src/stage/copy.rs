//! Filesystem copy primitives used when staging.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Copy a file, carrying over permissions and modification time.
///
/// Overwrites `dst` if it exists. Copying a file onto itself is a no-op.
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> io::Result<()> {
  if same_path(src, dst) {
    debug!(path = %src.display(), "source and destination are the same file, skipping");
    return Ok(());
  }

  let metadata = fs::metadata(src)?;

  // A read-only copy from an earlier run cannot be opened for writing.
  if dst.symlink_metadata().is_ok_and(|m| !m.is_dir()) {
    fs::remove_file(dst)?;
  }

  let mut reader = fs::File::open(src)?;
  let mut writer = fs::File::create(dst)?;
  io::copy(&mut reader, &mut writer)?;
  writer.set_modified(metadata.modified()?)?;
  drop(writer);

  // Permissions go on last so a read-only source still gets its mtime.
  fs::set_permissions(dst, metadata.permissions())
}

/// Replace `dst` with a recursive copy of `src`.
///
/// Any existing `dst` is removed first, so the result never mixes old and new
/// contents.
pub fn replace_dir(src: &Path, dst: &Path) -> io::Result<()> {
  if same_path(src, dst) {
    debug!(path = %src.display(), "source and destination are the same directory, skipping");
    return Ok(());
  }

  if dst.symlink_metadata().is_ok() {
    remove_path(dst)?;
  }

  copy_dir_all(src, dst)
}

/// Recursively copy a directory tree. Symlinks are followed and their
/// targets copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
  fs::create_dir_all(dst)?;

  for entry in WalkDir::new(src).min_depth(1).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(io::Error::other)?;
    let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target)?;
    } else {
      copy_file_with_metadata(entry.path(), &target)?;
    }
  }

  Ok(())
}

/// Remove a file, directory, or symlink.
fn remove_path(path: &Path) -> io::Result<()> {
  let is_link = path
    .symlink_metadata()
    .map(|m| m.file_type().is_symlink())
    .unwrap_or(false);

  if path.is_dir() && !is_link {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  }
}

fn same_path(a: &Path, b: &Path) -> bool {
  match (dunce::canonicalize(a), dunce::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}
