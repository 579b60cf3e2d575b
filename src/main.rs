//! # Tunesmith
//!
//! Batch tools for a local music folder.
//!
//! ## Usage
//!
//! ```bash
//! # Convert every FLAC below a directory, 8 encoders at a time
//! tunesmith convert /path/to/flac --output /path/to/mp3 --threads 8
//!
//! # Tag tools work on one directory level
//! tunesmith compilation /path/to/mix
//! tunesmith set-album -t /path/to/mix -a "Road Trip"
//! tunesmith rename /path/to/mix
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use tunesmith::cli::{Args, Command};
use tunesmith::commands::{self, ConvertRequest};
use tunesmith::completion;
use tunesmith::config::RuntimeConfig;

/// Main entry point for Tunesmith.
///
/// Initializes logging, parses arguments, loads configuration and routes to
/// the matching command runner.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tunesmith convert ~/Music` - Enable debug logging
/// - `RUST_LOG=tunesmith::dispatcher=debug tunesmith convert ~/Music` - Module-specific logging
///
/// # Exit status
///
/// Non-zero only when a run cannot start (missing directory, missing encoder,
/// unreadable config). Individual file failures are printed and do not change it.
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("Parsed arguments: {args:?}");

    match args.command {
        Command::Convert {
            directory,
            output,
            delete,
            threads,
            encoder,
        } => {
            let config = RuntimeConfig::load(args.config.as_deref())?
                .with_overrides(encoder, threads.map(usize::from));

            info!("Converting FLAC files under {}", directory.display());
            let request = ConvertRequest {
                directory,
                output,
                delete_original: delete,
            };
            commands::convert(&request, &config)?;
        }
        Command::Compilation { directory } => {
            commands::add_compilation_flags(&directory)?;
        }
        Command::SetAlbum { target_dir, album } => {
            commands::set_album(&target_dir, &album)?;
        }
        Command::Rename { directory } => {
            commands::rename_from_tags(&directory)?;
        }
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
