//! Numbered log rotation
//!
//! Rotated files live next to the live log as `<stem>.<n>.<ext>`. Index 0 is
//! the live file itself. Before a new log is opened, every existing file moves
//! up by one index and the file at the configured count is discarded.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Get the file name for rotation `index` of the log at `path`
///
/// Index 0 is the absolute, lexically cleaned form of `path` itself. Higher
/// indices insert the number before the last extension: `logs/app.log`
/// becomes `logs/app.2.log`. The stem keeps any inner dots, so
/// `my.app.log` becomes `my.app.2.log` and the live file always keeps its
/// full name as the prefix. A name without extension just gets the index
/// appended (`app` becomes `app.2`), with no trailing dot.
pub fn rotation_file_name(path: &Path, index: u32) -> io::Result<PathBuf> {
    let live = absolute_path(path)?;
    Ok(numbered(&live, index))
}

/// Absolute form of `path` with `.` dropped and `..` applied
///
/// Symlinks are not resolved, so the path need not exist.
fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let mut cleaned = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    Ok(cleaned)
}

/// Name for `index` given an already absolute live path
fn numbered(live: &Path, index: u32) -> PathBuf {
    if index == 0 {
        return live.to_path_buf();
    }

    let mut name = OsString::new();
    if let Some(stem) = live.file_stem() {
        name.push(stem);
    }
    name.push(format!(".{}", index));
    if let Some(ext) = live.extension() {
        name.push(".");
        name.push(ext);
    }
    live.with_file_name(name)
}

/// Shift the rotation set of `path` up by one index
///
/// The file at `rotation_count` is deleted, then each file `i` from
/// `rotation_count - 1` down to 0 is renamed to `i + 1`. Missing files are
/// skipped. A failed remove or rename is logged and the shift goes on.
///
/// Returns the number of files renamed. A count of 0 touches nothing.
pub fn rotate_files(path: &Path, rotation_count: u32) -> io::Result<usize> {
    if rotation_count == 0 {
        return Ok(0);
    }

    let live = absolute_path(path)?;

    let oldest = numbered(&live, rotation_count);
    if oldest.exists() {
        match fs::remove_file(&oldest) {
            Ok(()) => tracing::debug!("Removed oldest rotated log {}", oldest.display()),
            Err(e) => tracing::warn!("Failed to remove {}: {}", oldest.display(), e),
        }
    }

    let mut renamed = 0;
    for index in (0..rotation_count).rev() {
        let from = numbered(&live, index);
        if !from.exists() {
            continue;
        }

        let to = numbered(&live, index + 1);
        match fs::rename(&from, &to) {
            Ok(()) => renamed += 1,
            Err(e) => tracing::warn!(
                "Failed to rotate {} to {}: {}",
                from.display(),
                to.display(),
                e
            ),
        }
    }

    tracing::debug!("Rotated {} log files for {}", renamed, live.display());
    Ok(renamed)
}
