//! # Command Runners
//!
//! One function per subcommand. Each takes its directory explicitly, prints a
//! status line per file and a closing line regardless of per-file failures.
//!
//! Only setup problems (missing directory, missing encoder, bad thread count)
//! are returned as errors; everything that happens to an individual file is
//! printed and counted instead.

use crate::config::RuntimeConfig;
use crate::dispatcher::{BatchReport, Dispatcher};
use crate::encoder::{Encoder, Transcode};
use crate::format::AudioFormat;
use crate::job::{BatchOptions, JobBatch};
use crate::outcome::{Outcome, Tally};
use crate::scanner;
use crate::tags::{self, file_label};
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Settings for one `convert` run.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub directory: PathBuf,
    pub output: Option<PathBuf>,
    pub delete_original: bool,
}

/// `convert`: pre-flight the encoder, then run the batch on the worker pool.
///
/// # Errors
///
/// Fails before any conversion if the encoder is missing or the directory
/// cannot be scanned.
pub fn convert(request: &ConvertRequest, config: &RuntimeConfig) -> Result<BatchReport> {
    let encoder = Encoder::locate(&config.encoder).context("Encoder check failed")?;
    info!("Using encoder at {}", encoder.program().display());

    convert_with(request, config.threads, &encoder)
}

/// `convert` with an already-verified transcoder.
pub fn convert_with<T: Transcode + ?Sized>(
    request: &ConvertRequest,
    threads: usize,
    transcoder: &T,
) -> Result<BatchReport> {
    let options = BatchOptions {
        output_root: request.output.clone(),
        delete_original: request.delete_original,
        ..BatchOptions::default()
    };

    let batch = JobBatch::plan(&request.directory, &options)
        .with_context(|| format!("Cannot scan {}", request.directory.display()))?;

    if batch.is_empty() {
        println!(
            "No {} files found in {}",
            options.source_format,
            request.directory.display()
        );
        return Ok(BatchReport::default());
    }

    println!("Found {} {} files to convert", batch.len(), options.source_format);

    let dispatcher = Dispatcher::new(threads)?;
    let report = dispatcher.run(batch, transcoder);

    if report.failed > 0 || report.delete_failed > 0 {
        println!(
            "{} converted, {} failed, {} originals could not be deleted",
            report.converted, report.failed, report.delete_failed
        );
    }
    println!("Conversion complete!");
    info!("Convert finished: {report:?}");

    Ok(report)
}

/// `compilation`: set the compilation flag on every MP3 in `directory`.
pub fn add_compilation_flags(directory: &Path) -> Result<Tally> {
    println!("Starting to add compilation flags...");

    let files = scanner::list_directory(directory, AudioFormat::Mp3)
        .with_context(|| format!("Cannot list {}", directory.display()))?;

    let mut tally = Tally::default();
    for path in &files {
        let name = file_label(path);
        let outcome = tags::add_compilation_flag(path);
        match &outcome {
            Outcome::Success(()) => println!("Added compilation flag to: {name}"),
            Outcome::Skipped(reason) => println!("Skipping {name}: {reason}"),
            Outcome::Failed(e) => println!("Error processing {name}: {e}"),
        }
        tally.record(&outcome);
    }

    println!("Done!");
    Ok(tally)
}

/// `set-album`: write `album` into every MP3 in `directory`.
pub fn set_album(directory: &Path, album: &str) -> Result<Tally> {
    let files = scanner::list_directory(directory, AudioFormat::Mp3)
        .with_context(|| format!("Cannot list {}", directory.display()))?;

    if files.is_empty() {
        println!("No MP3 files found in {}", directory.display());
        return Ok(Tally::default());
    }

    println!(
        "Setting album to '{album}' for {} files in {}",
        files.len(),
        directory.display()
    );

    let mut tally = Tally::default();
    for path in &files {
        let name = file_label(path);
        let outcome = tags::set_album(path, album);
        match &outcome {
            Outcome::Success(()) => println!("Updated: {name}"),
            Outcome::Skipped(reason) => println!("Skipping {name}: {reason}"),
            Outcome::Failed(e) => println!("Error processing {name}: {e}"),
        }
        tally.record(&outcome);
    }

    println!("Album tag update complete!");
    Ok(tally)
}

/// `rename`: rename every MP3 in `directory` from its title and artist tags.
pub fn rename_from_tags(directory: &Path) -> Result<Tally> {
    println!("Starting MP3 file renaming...");

    let files = scanner::list_directory(directory, AudioFormat::Mp3)
        .with_context(|| format!("Cannot list {}", directory.display()))?;

    let mut tally = Tally::default();
    for path in &files {
        let name = file_label(path);
        let outcome = tags::rename_from_tags(path);
        match &outcome {
            Outcome::Success(new_path) => println!("Renamed: {name} -> {}", file_label(new_path)),
            Outcome::Skipped(reason) => println!("Skipping {name}: {reason}"),
            Outcome::Failed(e) => println!("Error renaming {name}: {e}"),
        }
        tally.record(&outcome);
    }

    println!("Done!");
    Ok(tally)
}
