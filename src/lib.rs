//! Batch tools for a local music folder: tag editing, tag-based renaming and
//! FLAC to MP3 conversion.
//!
//! Core modules:
//! - [`scanner`] - Finding audio files by extension
//! - [`paths`] - Deriving output paths for converted files
//! - [`encoder`] - Running the external encoder
//! - [`job`] - Conversion tasks and batches
//! - [`dispatcher`] - Bounded worker pool that runs a batch
//! - [`tags`] - ID3 tag operations (compilation flag, album, rename)
//!
//! ### Supporting Modules
//!
//! - [`commands`] - One runner per CLI subcommand, printing status lines
//! - [`config`] - Optional JSON configuration
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`error`] / [`outcome`] - Error type and per-file results
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use tunesmith::dispatcher::Dispatcher;
//! use tunesmith::encoder::Encoder;
//! use tunesmith::job::{BatchOptions, JobBatch};
//! use std::path::Path;
//!
//! // Fails up front if ffmpeg is not installed
//! let encoder = Encoder::locate("ffmpeg")?;
//!
//! let batch = JobBatch::plan(Path::new("/music/lossless"), &BatchOptions::default())?;
//! let report = Dispatcher::new(4)?.run(batch, &encoder);
//! println!("{} converted, {} failed", report.converted, report.failed);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Per-file problems never abort a batch. Tag operations return an
//! [`outcome::Outcome`] and conversions a [`job::TaskOutcome`]; only a
//! missing directory or a missing encoder stops a run before it starts.

pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod dispatcher;
pub mod encoder;
pub mod error;
pub mod format;
pub mod job;
pub mod outcome;
pub mod paths;
pub mod scanner;
pub mod tags;

pub use error::{Error, Result};
