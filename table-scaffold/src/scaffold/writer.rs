//! File-system side of scaffolding
//!
//! All writes go through this module. Every function takes the paths it
//! touches as arguments; the destination root is never held in shared state.
//! Writes always overwrite, so per-table files are produced fresh each run.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Check that `root` is absent or an empty directory
///
/// Runs before anything is written; a violation leaves the destination
/// untouched.
///
/// # Errors
///
/// Returns [`ScaffoldError::DestinationNotEmpty`] if `root` has entries,
/// [`ScaffoldError::DestinationNotDirectory`] if it is not a directory, or
/// [`ScaffoldError::Destination`] if it cannot be inspected.
pub async fn ensure_destination_available(root: &Path) -> Result<()> {
    let inspect_err = |source| ScaffoldError::Destination {
        path: root.to_path_buf(),
        source,
    };

    let metadata = match fs::metadata(root).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(inspect_err(e)),
    };

    if !metadata.is_dir() {
        return Err(ScaffoldError::DestinationNotDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut entries = fs::read_dir(root).await.map_err(inspect_err)?;
    if entries.next_entry().await.map_err(inspect_err)?.is_some() {
        return Err(ScaffoldError::DestinationNotEmpty {
            path: root.to_path_buf(),
        });
    }

    Ok(())
}

/// Create `path` and any missing parents
///
/// # Errors
///
/// Returns [`ScaffoldError::CreateDir`] if creation fails.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| ScaffoldError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

/// Mirror the static tree at `src` into `dest`
///
/// Directories are created before their contents; entries are visited in
/// file-name order. Returns the copied files relative to `dest`.
///
/// # Errors
///
/// Returns [`ScaffoldError::Walk`] if `src` cannot be walked, or
/// [`ScaffoldError::CreateDir`] / [`ScaffoldError::Copy`] if any entry fails.
pub async fn copy_tree(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target).await?;
        } else {
            copy_file(entry.path(), &target).await?;
            copied.push(relative.to_path_buf());
        }
    }

    tracing::debug!(from = %src.display(), to = %dest.display(), files = copied.len(), "Copied static tree");
    Ok(copied)
}

/// Copy one file, creating the destination's parent directories
///
/// # Errors
///
/// Returns [`ScaffoldError::CreateDir`] or [`ScaffoldError::Copy`].
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        ensure_dir(parent).await?;
    }

    fs::copy(from, to)
        .await
        .map_err(|source| ScaffoldError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Write a generated file, replacing any previous content
///
/// # Errors
///
/// Returns [`ScaffoldError::CreateDir`] or [`ScaffoldError::Write`].
pub async fn write_generated(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    fs::write(path, content)
        .await
        .map_err(|source| ScaffoldError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Read a template document
///
/// # Errors
///
/// Returns [`ScaffoldError::TemplateRead`] if the file is missing or
/// unreadable.
pub async fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|source| ScaffoldError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Absolute, lexically normalized form of a destination path
///
/// `.` components are dropped and `..` pops the previous component, so the
/// root handed to [`cleanup`] is the directory itself and never `dir/.`.
/// Symlinks are not resolved.
///
/// # Errors
///
/// Returns [`ScaffoldError::Destination`] if a relative path cannot be made
/// absolute (the current directory is unavailable).
pub fn normalize_destination(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| ScaffoldError::Destination {
        path: path.to_path_buf(),
        source,
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Remove the destination root and everything under it
///
/// Best effort: a failure is logged and swallowed so it can never replace the
/// error that triggered the cleanup.
pub async fn cleanup(root: &Path) {
    tracing::info!(path = %root.display(), "Cleaning up destination folder");

    match fs::remove_dir_all(root).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(path = %root.display(), error = %e, "Failed to clean up destination folder");
        }
    }
}
