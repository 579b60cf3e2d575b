//! # Conversion Jobs
//!
//! A [`JobBatch`] is planned up front from a directory scan: one
//! [`ConversionTask`] per source file, each with its destination already
//! computed. Tasks share nothing and may run in any order.
//!
//! [`process_task`] runs one task to completion and never panics or returns
//! an error; every failure ends up in the returned [`TaskOutcome`].

use crate::encoder::Transcode;
use crate::error::{Error, Result};
use crate::format::AudioFormat;
use crate::paths;
use crate::scanner::{self, InputFile};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One source file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub delete_original: bool,
}

/// What happened to the source file after a successful conversion.
#[derive(Debug)]
pub enum OriginalStatus {
    Kept,
    Deleted,
    /// Conversion stands; the source is still on disk.
    DeleteFailed(Error),
}

#[derive(Debug)]
pub enum TaskOutcome {
    Converted {
        source: PathBuf,
        destination: PathBuf,
        original: OriginalStatus,
    },
    Failed { source: PathBuf, error: Error },
}

impl TaskOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, TaskOutcome::Converted { .. })
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Converted {
                source,
                destination,
                original,
            } => {
                write!(f, "Converted: {} -> {}", source.display(), destination.display())?;
                match original {
                    OriginalStatus::Kept => Ok(()),
                    OriginalStatus::Deleted => {
                        write!(f, "\nDeleted original: {}", source.display())
                    }
                    OriginalStatus::DeleteFailed(e) => {
                        write!(f, "\nError deleting {}: {e}", source.display())
                    }
                }
            }
            TaskOutcome::Failed { source, error } => {
                write!(f, "Error converting {}: {error}", source.display())
            }
        }
    }
}

/// Options that apply to every task in a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub source_format: AudioFormat,
    pub target_format: AudioFormat,
    pub output_root: Option<PathBuf>,
    pub delete_original: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            source_format: AudioFormat::Flac,
            target_format: AudioFormat::Mp3,
            output_root: None,
            delete_original: false,
        }
    }
}

/// A source left out of the batch because an earlier source already writes
/// its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationConflict {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub claimed_by: PathBuf,
}

impl DestinationConflict {
    /// The outcome reported for this source. It is never transcoded or deleted.
    pub fn into_outcome(self) -> TaskOutcome {
        TaskOutcome::Failed {
            source: self.source,
            error: Error::DestinationTaken {
                destination: self.destination,
                claimed_by: self.claimed_by,
            },
        }
    }
}

/// Every task derived from one scan.
#[derive(Debug, Clone, Default)]
pub struct JobBatch {
    tasks: Vec<ConversionTask>,
    conflicts: Vec<DestinationConflict>,
}

/// Destinations are compared case-insensitively so `a.flac` and `A.flac` also
/// collide on filesystems that fold case.
fn destination_key(destination: &Path) -> String {
    destination.to_string_lossy().to_lowercase()
}

impl JobBatch {
    /// Scan `root` and plan one task per matching file.
    ///
    /// # Errors
    ///
    /// Fails only if `root` cannot be scanned (see [`scanner::scan`]).
    pub fn plan(root: &Path, options: &BatchOptions) -> Result<Self> {
        let files = scanner::scan(root, options.source_format)?;
        let root = InputFile::new(root)?;
        Ok(Self::from_files(&files, root.path(), options))
    }

    /// Plan tasks for already-discovered files under `scan_root`.
    ///
    /// Each destination is written by at most one task. A later file mapping
    /// to a destination that is already claimed (`a.flac` next to `a.FLAC`)
    /// becomes a [`DestinationConflict`] instead of a task.
    pub fn from_files(files: &[InputFile], scan_root: &Path, options: &BatchOptions) -> Self {
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();
        let mut batch = Self::default();

        for file in files {
            let destination = paths::destination_path(
                file.path(),
                scan_root,
                options.output_root.as_deref(),
                options.target_format,
            );

            match claimed.entry(destination_key(&destination)) {
                Entry::Occupied(entry) => {
                    warn!(
                        "{} and {} both map to {}; skipping the second",
                        entry.get().display(),
                        file.path().display(),
                        destination.display()
                    );
                    batch.conflicts.push(DestinationConflict {
                        source: file.path().to_path_buf(),
                        destination,
                        claimed_by: entry.get().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(file.path().to_path_buf());
                    batch.tasks.push(ConversionTask {
                        source: file.path().to_path_buf(),
                        destination,
                        delete_original: options.delete_original,
                    });
                }
            }
        }

        batch
    }

    pub fn tasks(&self) -> &[ConversionTask] {
        &self.tasks
    }

    pub fn conflicts(&self) -> &[DestinationConflict] {
        &self.conflicts
    }

    /// Number of source files in the batch, conflicting ones included.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.conflicts.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ConversionTask>, Vec<DestinationConflict>) {
        (self.tasks, self.conflicts)
    }
}

impl From<Vec<ConversionTask>> for JobBatch {
    fn from(tasks: Vec<ConversionTask>) -> Self {
        Self {
            tasks,
            conflicts: Vec::new(),
        }
    }
}

/// Run one task: prepare the destination, transcode, then maybe delete the source.
///
/// The source is only ever deleted after the transcoder reported success.
pub fn process_task<T: Transcode + ?Sized>(transcoder: &T, task: &ConversionTask) -> TaskOutcome {
    let failed = |error: Error| TaskOutcome::Failed {
        source: task.source.clone(),
        error,
    };

    if let Err(e) = paths::ensure_parent_dir(&task.destination) {
        return failed(e);
    }

    if let Err(e) = transcoder.transcode(&task.source, &task.destination) {
        warn!("Conversion failed for {}: {e}", task.source.display());
        return failed(e);
    }

    let original = if task.delete_original {
        match fs::remove_file(&task.source) {
            Ok(()) => {
                debug!("Removed {}", task.source.display());
                OriginalStatus::Deleted
            }
            Err(e) => {
                warn!("Could not delete {}: {e}", task.source.display());
                OriginalStatus::DeleteFailed(e.into())
            }
        }
    } else {
        OriginalStatus::Kept
    };

    TaskOutcome::Converted {
        source: task.source.clone(),
        destination: task.destination.clone(),
        original,
    }
}
