//! # Error Types
//!
//! Library-level errors. Every per-file operation converts these into an
//! [`Outcome`](crate::outcome::Outcome) or [`TaskOutcome`](crate::job::TaskOutcome)
//! at the file boundary; only [`Error::DirectoryNotFound`] and
//! [`Error::EncoderMissing`] are meant to stop a whole run.
//!
//! The binary wraps these in `anyhow::Error` for reporting.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Scan root is missing or is not a directory.
    #[error("Directory not found - {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The external encoder could not be located or refused to start.
    #[error("{program} is not installed or not runnable. Please install {program} first.")]
    EncoderMissing { program: String },

    /// The encoder ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    EncoderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Another source in the same batch already maps to this output file.
    #[error("{} is already the output of {}", destination.display(), claimed_by.display())]
    DestinationTaken {
        destination: PathBuf,
        claimed_by: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tag(#[from] id3::Error),
}
