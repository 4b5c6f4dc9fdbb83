//! Filesystem helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `content` to `path` atomically.
///
/// The content goes to a sibling temp file first and is then renamed over
/// `path`, so readers never observe a partially written file.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let temp_path = temp_sibling(path);

  if let Err(e) = fs::write(&temp_path, content) {
    let _ = fs::remove_file(&temp_path);
    return Err(e);
  }
  if let Err(e) = fs::rename(&temp_path, path) {
    let _ = fs::remove_file(&temp_path);
    return Err(e);
  }
  Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}
