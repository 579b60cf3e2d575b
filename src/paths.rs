//! # Output Path Resolver
//!
//! Maps a source file to the file the encoder should write.
//!
//! ```text
//! root/sub/x.flac, output = None        -> root/sub/x.mp3
//! root/sub/x.flac, output = Some("out") -> out/sub/x.mp3
//! ```
//!
//! Only the extension changes; the stem is kept as-is.

use crate::error::Result;
use crate::format::AudioFormat;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Compute the destination for `source` without touching the filesystem.
///
/// With `output_root`, the source's directory relative to `scan_root` is
/// recreated under `output_root`. A source outside `scan_root` lands directly
/// in `output_root`.
#[must_use]
pub fn destination_path(
    source: &Path,
    scan_root: &Path,
    output_root: Option<&Path>,
    target: AudioFormat,
) -> PathBuf {
    // Appended rather than `with_extension`, which would eat dotted stems.
    let mut file_name = source.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".");
    file_name.push(target.extension());
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));

    let dest_dir = match output_root {
        None => source_dir.to_path_buf(),
        Some(output_root) => match source_dir.strip_prefix(scan_root) {
            Ok(relative) => output_root.join(relative),
            Err(_) => {
                debug!(
                    "{} is outside {}, writing to output root",
                    source.display(),
                    scan_root.display()
                );
                output_root.to_path_buf()
            }
        },
    };

    dest_dir.join(file_name)
}

/// Create the directory that will hold `destination`.
///
/// Idempotent and safe to call from several workers for the same directory.
pub fn ensure_parent_dir(destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// [`destination_path`] followed by [`ensure_parent_dir`].
pub fn resolve_destination(
    source: &Path,
    scan_root: &Path,
    output_root: Option<&Path>,
    target: AudioFormat,
) -> Result<PathBuf> {
    let destination = destination_path(source, scan_root, output_root, target);
    ensure_parent_dir(&destination)?;
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_alongside_source_without_override() {
        let dest = destination_path(
            Path::new("/root/sub/x.flac"),
            Path::new("/root"),
            None,
            AudioFormat::Mp3,
        );
        assert_eq!(dest, PathBuf::from("/root/sub/x.mp3"));
    }

    #[test]
    fn test_rerooted_under_output() {
        let dest = destination_path(
            Path::new("/root/sub/x.flac"),
            Path::new("/root"),
            Some(Path::new("/out")),
            AudioFormat::Mp3,
        );
        assert_eq!(dest, PathBuf::from("/out/sub/x.mp3"));
    }

    #[test]
    fn test_file_directly_in_root() {
        let dest = destination_path(
            Path::new("/root/x.flac"),
            Path::new("/root"),
            Some(Path::new("/out")),
            AudioFormat::Mp3,
        );
        assert_eq!(dest, PathBuf::from("/out/x.mp3"));
    }

    #[test]
    fn test_stem_with_dots_is_preserved() {
        let dest = destination_path(
            Path::new("/root/01. Intro.v2.FLAC"),
            Path::new("/root"),
            None,
            AudioFormat::Mp3,
        );
        assert_eq!(dest, PathBuf::from("/root/01. Intro.v2.mp3"));
    }

    #[test]
    fn test_source_outside_scan_root() {
        let dest = destination_path(
            Path::new("/elsewhere/deep/x.flac"),
            Path::new("/root"),
            Some(Path::new("/out")),
            AudioFormat::Mp3,
        );
        assert_eq!(dest, PathBuf::from("/out/x.mp3"));
    }

    #[test]
    fn test_same_destination_on_rerun() {
        let first = destination_path(Path::new("/r/a/x.flac"), Path::new("/r"), None, AudioFormat::Mp3);
        let second = destination_path(Path::new("/r/a/x.flac"), Path::new("/r"), None, AudioFormat::Mp3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_creates_directories_idempotently() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("music");
        let out = temp_dir.path().join("converted");
        let source = root.join("artist/album/track.flac");

        let first = resolve_destination(&source, &root, Some(&out), AudioFormat::Mp3).unwrap();
        let second = resolve_destination(&source, &root, Some(&out), AudioFormat::Mp3).unwrap();

        assert_eq!(first, out.join("artist/album/track.mp3"));
        assert_eq!(first, second);
        assert!(out.join("artist/album").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_concurrently() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("a/b/c/track.mp3");

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| ensure_parent_dir(&dest).unwrap());
            }
        });

        assert!(temp_dir.path().join("a/b/c").is_dir());
    }
}
