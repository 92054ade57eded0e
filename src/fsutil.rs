//! Small filesystem helpers used by discovery, the build pipeline and
//! publishing.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ElementError, Result};

/// True if `path` exists and is a regular file (symlinks followed).
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// True if `path` exists and is a directory (symlinks followed).
pub fn folder_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Names of the immediate subdirectories of `path`, sorted.
///
/// An unreadable or missing directory yields an empty list; callers decide
/// whether emptiness is an error.
pub fn child_directories(path: &Path) -> Vec<String> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("cannot read directory {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Copy one file, creating the destination's parent folders.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| ElementError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }
    fs::copy(from, to).map_err(|e| ElementError::Io {
        path: to.to_path_buf(),
        message: format!("Failed to copy {}: {}", from.display(), e),
    })?;
    Ok(())
}

/// Recursively copy the contents of `from` into `to`. Returns the number of
/// files copied.
pub fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        copy_file(entry.path(), &to.join(relative))?;
        copied += 1;
    }
    Ok(copied)
}

/// Remove a file if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ElementError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to remove file: {}", e),
        }),
    }
}
