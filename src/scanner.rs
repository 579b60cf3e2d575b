//! # Directory Scanner
//!
//! Finds audio files of one [`AudioFormat`] under a directory.
//!
//! - [`scan`] walks the whole tree below the root (used by `convert`)
//! - [`list_directory`] looks at a single directory level (used by the tag tools)
//!
//! Both fail with [`Error::DirectoryNotFound`] when the root is missing or is
//! not a directory, and return an empty list when nothing matches. Results are
//! sorted by path so status output is stable between runs.

use crate::error::{Error, Result};
use crate::format::AudioFormat;
use log::{debug, info, warn};
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    /// Wraps `path`, making it absolute against the current directory.
    pub fn new(path: &Path) -> Result<Self> {
        let path = path.absolutize()?.into_owned();
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

}

fn require_directory(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound(root.to_path_buf()))
    }
}

/// Recursively collect every file below `root` whose extension matches `format`.
///
/// Symlinks are not followed. Entries that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `root` does not exist or is not a directory.
pub fn scan(root: &Path, format: AudioFormat) -> Result<Vec<InputFile>> {
    require_directory(root)?;
    let root = root.absolutize()?;
    debug!("Scanning {} for {format} files", root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_file() || !format.matches(entry.path()) {
            continue;
        }

        files.push(InputFile {
            path: entry.into_path(),
        });
    }

    info!("Found {} {format} files under {}", files.len(), root.display());
    Ok(files)
}

/// List the files directly inside `dir` (no recursion) that match `format`.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] for a missing directory and
/// [`Error::Io`] if the directory cannot be read.
pub fn list_directory(dir: &Path, format: AudioFormat) -> Result<Vec<PathBuf>> {
    require_directory(dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && format.matches(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!("Listed {} {format} files in {}", files.len(), dir.display());
    Ok(files)
}
