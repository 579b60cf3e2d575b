//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `tunesmith` binary.
//!
//! ## Commands
//!
//! - `convert`: Transcode every FLAC file under a directory to MP3
//! - `compilation`: Mark every MP3 in a directory as part of a compilation
//! - `set-album`: Write one album name into every MP3 in a directory
//! - `rename`: Rename every MP3 in a directory to "Title - Artist.mp3"
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! tunesmith convert ~/Music/lossless --output ~/Music/mp3 --threads 8
//! tunesmith set-album -t ~/Music/mix -a "Summer Mix"
//! tunesmith rename ~/Music/mix
//! ```

use clap::{value_parser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "tunesmith")]
#[command(about = "Tunesmith: batch tag editing, renaming and FLAC to MP3 conversion")]
#[command(version)]
pub struct Args {
    /// Path to a JSON config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TUNESMITH_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert FLAC files to MP3 (LAME V0, highest quality)
    ///
    /// Searches DIRECTORY recursively for .flac files (any case) and encodes
    /// each one with ffmpeg. Per-file failures are reported and the run
    /// continues; the exit code stays 0.
    Convert {
        /// Directory to search for FLAC files
        #[arg(value_hint = clap::ValueHint::DirPath)]
        directory: PathBuf,

        /// Output directory (default: next to each FLAC file)
        ///
        /// Subdirectories below DIRECTORY are recreated under OUTPUT.
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Delete original FLAC files after a successful conversion
        #[arg(short, long)]
        delete: bool,

        /// Number of parallel encoder processes (default: 4)
        #[arg(short, long, value_parser = value_parser!(u16).range(1..))]
        threads: Option<u16>,

        /// Encoder executable to run instead of ffmpeg
        #[arg(long, env = "TUNESMITH_ENCODER")]
        encoder: Option<String>,
    },

    /// Add the compilation flag (TCMP) to every MP3 in a directory
    ///
    /// Files without an ID3 tag are skipped.
    Compilation {
        /// Directory containing MP3 files
        #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
        directory: PathBuf,
    },

    /// Set the album tag for all MP3 files in a directory
    SetAlbum {
        /// Directory containing MP3 files
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        target_dir: PathBuf,

        /// Album name to set
        #[arg(short, long)]
        album: String,
    },

    /// Rename MP3 files to "Title - Artist.mp3" using their ID3 tags
    ///
    /// Files lacking both title and artist keep their name.
    Rename {
        /// Directory containing MP3 files
        #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
        directory: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Usage: tunesmith completion bash > ~/.local/share/bash-completion/completions/tunesmith
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_convert_flags() {
        let args = Args::try_parse_from([
            "tunesmith", "convert", "music", "-o", "out", "--delete", "-t", "8",
        ])
        .unwrap();

        match args.command {
            Command::Convert {
                directory,
                output,
                delete,
                threads,
                ..
            } => {
                assert_eq!(directory, PathBuf::from("music"));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(delete);
                assert_eq!(threads, Some(8));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_convert_defaults() {
        let args = Args::try_parse_from(["tunesmith", "convert", "music"]).unwrap();
        match args.command {
            Command::Convert {
                output,
                delete,
                threads,
                ..
            } => {
                assert!(output.is_none());
                assert!(!delete);
                assert!(threads.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(Args::try_parse_from(["tunesmith", "convert", "music", "-t", "0"]).is_err());
    }

    #[test]
    fn test_set_album_requires_both_arguments() {
        assert!(Args::try_parse_from(["tunesmith", "set-album", "-t", "dir"]).is_err());
        assert!(Args::try_parse_from(["tunesmith", "set-album", "-a", "Foo"]).is_err());

        let args =
            Args::try_parse_from(["tunesmith", "set-album", "-t", "dir", "-a", "Foo"]).unwrap();
        assert!(matches!(
            args.command,
            Command::SetAlbum { ref album, .. } if album == "Foo"
        ));
    }

    #[test]
    fn test_tag_commands_default_to_current_directory() {
        let args = Args::try_parse_from(["tunesmith", "rename"]).unwrap();
        assert!(matches!(args.command, Command::Rename { ref directory } if directory == &PathBuf::from(".")));

        let args = Args::try_parse_from(["tunesmith", "compilation"]).unwrap();
        assert!(matches!(args.command, Command::Compilation { ref directory } if directory == &PathBuf::from(".")));
    }
}
