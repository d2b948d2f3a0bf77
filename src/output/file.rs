//! Atomic file output.
//!
//! Every artifact is first written to a temporary file in its destination
//! directory. Only after all of a batch has been staged are the temporary
//! files renamed over their targets, and a failed rename rolls back the
//! ones before it, so a failure leaves earlier artifacts untouched.

use crate::utils::error::OutputError;
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};

/// Validate that an output file path is usable
///
/// **Public** - shared by every writer
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Refuse to replace a directory with a report
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create `dir` (and parents) if it does not exist yet
///
/// **Public** - used before staging files
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(OutputError::InvalidPath(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    debug!("Creating output directory: {}", dir.display());
    std::fs::create_dir_all(dir).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", dir.display(), e))
    })
}

/// Destination path and full contents of one output file
pub type Artifact = (PathBuf, Vec<u8>);

/// A staged artifact waiting to be renamed over its target
///
/// **Private** - produced by stage, consumed by commit
struct Staged<'a> {
    tmp: NamedTempFile,
    target: &'a Path,
    /// Copy of the previous target contents, if there was one
    backup: Option<TempPath>,
}

/// Write a batch of files, replacing each target only once all are staged
///
/// **Public** - main entry point for persisting artifacts
///
/// If a rename fails part way through, targets already replaced in this
/// batch are restored to their previous contents (or removed when they did
/// not exist before), so the batch lands completely or not at all.
///
/// # Arguments
/// * `files` - Pairs of destination path and full file contents
///
/// # Errors
/// * `OutputError::InvalidPath` - a destination is empty or a directory
/// * `OutputError::WriteFailed` - staging failed
/// * `OutputError::Persist` - renaming a staged file into place failed
pub fn write_atomic_batch(files: &[Artifact]) -> Result<(), OutputError> {
    let staged = stage(files)?;
    commit(staged)
}

fn stage(files: &[Artifact]) -> Result<Vec<Staged<'_>>, OutputError> {
    let mut staged = Vec::with_capacity(files.len());

    for (path, contents) in files {
        validate_path(path)?;

        let dir = parent_dir(path);
        ensure_dir(dir)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failed(dir, e))?;
        tmp.write_all(contents).map_err(|e| write_failed(path, e))?;
        tmp.flush().map_err(|e| write_failed(path, e))?;

        let backup = backup_existing(path, dir)?;

        debug!("Staged {} ({} bytes)", path.display(), contents.len());
        staged.push(Staged {
            tmp,
            target: path,
            backup,
        });
    }

    Ok(staged)
}

fn backup_existing(path: &Path, dir: &Path) -> Result<Option<TempPath>, OutputError> {
    if !path.is_file() {
        return Ok(None);
    }

    let backup = NamedTempFile::new_in(dir)
        .map_err(|e| write_failed(dir, e))?
        .into_temp_path();
    std::fs::copy(path, &backup).map_err(|e| write_failed(path, e))?;
    Ok(Some(backup))
}

fn commit(staged: Vec<Staged<'_>>) -> Result<(), OutputError> {
    let mut committed: Vec<(&Path, Option<TempPath>)> = Vec::with_capacity(staged.len());

    for Staged {
        tmp,
        target,
        backup,
    } in staged
    {
        if let Err(e) = tmp.persist(target) {
            rollback(committed);
            return Err(OutputError::Persist {
                path: target.to_path_buf(),
                source: e.error,
            });
        }
        committed.push((target, backup));
    }

    Ok(())
}

/// Undo the renames of a partially committed batch, newest first
fn rollback(committed: Vec<(&Path, Option<TempPath>)>) {
    for (target, backup) in committed.into_iter().rev() {
        let restored = match backup {
            Some(backup) => backup.persist(target).map_err(|e| e.error),
            None => std::fs::remove_file(target),
        };

        match restored {
            Ok(()) => debug!("Restored {}", target.display()),
            Err(e) => warn!("Failed to restore {}: {}", target.display(), e),
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_failed(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}
