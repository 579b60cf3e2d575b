//! # Encoder Integration
//!
//! Runs the external encoder (`ffmpeg` by default) as a blocking subprocess,
//! one process per file: build a [`Command`], wait for it, inspect the exit
//! status.
//!
//! The argument template is fixed:
//!
//! ```text
//! ffmpeg -nostdin -i <src> -codec:a libmp3lame -q:a 0 -id3v2_version 3 -loglevel warning -y <dst>
//! ```
//!
//! `-q:a 0` is LAME's highest VBR quality, `-y` overwrites an existing
//! destination so re-runs are idempotent on the output path.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default encoder program name.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Anything that can turn one source file into one destination file.
///
/// [`Encoder`] is the real implementation; tests substitute their own.
pub trait Transcode: Sync {
    fn transcode(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// Handle to an external encoder executable.
#[derive(Debug, Clone)]
pub struct Encoder {
    program: PathBuf,
}

impl Encoder {
    /// Use `program` as-is, without checking that it exists.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate `program` on `PATH` and confirm it starts.
    ///
    /// This is the batch pre-flight check; it runs once, before any task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncoderMissing`] if the program cannot be found or
    /// `<program> -version` cannot be executed.
    pub fn locate(program: &str) -> Result<Self> {
        let missing = || Error::EncoderMissing {
            program: program.to_string(),
        };

        let path = which::which(program).map_err(|e| {
            debug!("which({program}) failed: {e}");
            missing()
        })?;

        let status = Command::new(&path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                debug!("Could not run {}: {e}", path.display());
                missing()
            })?;

        if !status.success() {
            warn!("{} -version exited with {status}", path.display());
        }

        Ok(Self::new(path))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the encoder for one conversion.
    #[must_use]
    pub fn arguments(source: &Path, destination: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = Vec::with_capacity(13);
        args.push("-nostdin".into());
        args.push("-i".into());
        args.push(source.as_os_str().to_owned());
        for arg in [
            "-codec:a",
            "libmp3lame",
            "-q:a",
            "0",
            "-id3v2_version",
            "3",
            "-loglevel",
            "warning",
            "-y",
        ] {
            args.push(arg.into());
        }
        args.push(destination.as_os_str().to_owned());
        args
    }

    fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl Transcode for Encoder {
    fn transcode(&self, source: &Path, destination: &Path) -> Result<()> {
        debug!("Encoding {} -> {}", source.display(), destination.display());

        let output = Command::new(&self.program)
            .args(Self::arguments(source, destination))
            .stdin(Stdio::null())
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(Error::EncoderFailed {
                program: self.display_name(),
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!("{}: {stderr}", source.display());
        }

        Ok(())
    }
}
