//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Whether the call created the entry or found it already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    New,
    AlreadyExists,
}

/// Create a directory and any missing parents.
///
/// An existing directory is success. Any other I/O error propagates.
pub fn create_dir_idempotent(path: &Path) -> Result<Created> {
    if path.is_dir() {
        return Ok(Created::AlreadyExists);
    }
    match fs::create_dir_all(path) {
        Ok(()) => Ok(Created::New),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
            Ok(Created::AlreadyExists)
        }
        Err(e) => Err(e).with_context(|| format!("failed to create directory: {}", path.display())),
    }
}

/// Write a file only if nothing exists at `path` yet.
///
/// Existing files are never touched.
pub fn write_if_absent(path: &Path, contents: &str) -> Result<Created> {
    if entry_exists(path) {
        return Ok(Created::AlreadyExists);
    }
    match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(contents.as_bytes())
                .with_context(|| format!("failed to write file: {}", path.display()))?;
            Ok(Created::New)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Created::AlreadyExists),
        Err(e) => Err(e).with_context(|| format!("failed to write file: {}", path.display())),
    }
}

/// Whether any filesystem entry exists at `path`.
///
/// Unlike [`Path::exists`], a dangling symbolic link counts as an entry.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create a directory symlink at `dst` pointing to `src`, unless `dst` exists.
pub fn symlink_idempotent(src: &Path, dst: &Path) -> Result<Created> {
    if entry_exists(dst) {
        return Ok(Created::AlreadyExists);
    }
    match symlink_dir(src, dst) {
        Ok(()) => Ok(Created::New),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Created::AlreadyExists),
        Err(e) => Err(e).with_context(|| {
            format!("failed to link {} -> {}", dst.display(), src.display())
        }),
    }
}

#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}
