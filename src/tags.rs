//! # ID3 Tag Operations
//!
//! Single-file operations behind the `compilation`, `set-album` and `rename`
//! commands. Each returns an [`Outcome`] instead of an error so a directory
//! loop can report and move on.
//!
//! Tags are read and written with the `id3` crate. An existing tag keeps its
//! ID3v2 version when written back; a freshly created tag is written as ID3v2.4.

use crate::error::Error;
use crate::outcome::Outcome;
use id3::{Tag, TagLike, Version};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// ID3v2 frame holding the iTunes compilation flag.
pub const COMPILATION_FRAME: &str = "TCMP";

/// Characters replaced with `_` in generated filenames.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Filename of `path` for status lines.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read the tag of `path`, mapping "no ID3 header" to `Ok(None)`.
pub fn read_tag(path: &Path) -> Result<Option<Tag>, Error> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(Some(tag)),
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_tag(tag: &Tag, path: &Path) -> Result<(), Error> {
    let version = match tag.version() {
        Version::Id3v22 => Version::Id3v23,
        other => other,
    };
    tag.write_to_path(path, version)?;
    Ok(())
}

/// Set `TCMP = "1"` on a file that already has an ID3 tag.
///
/// Files without any tag are skipped rather than given a new one.
pub fn add_compilation_flag(path: &Path) -> Outcome {
    let mut tag = match read_tag(path) {
        Ok(Some(tag)) => tag,
        Ok(None) => return Outcome::Skipped("No ID3 tags found".to_string()),
        Err(e) => return e.into(),
    };

    tag.set_text(COMPILATION_FRAME, "1");

    match write_tag(&tag, path) {
        Ok(()) => {
            debug!("Set {COMPILATION_FRAME} on {}", path.display());
            Outcome::Success(())
        }
        Err(e) => e.into(),
    }
}

/// Write `album` into the file's tag, creating a tag if there is none.
pub fn set_album(path: &Path, album: &str) -> Outcome {
    let mut tag = match read_tag(path) {
        Ok(Some(tag)) => tag,
        Ok(None) => {
            debug!("{} has no tag, creating one", path.display());
            Tag::with_version(Version::Id3v24)
        }
        Err(e) => return e.into(),
    };

    tag.set_album(album);

    match write_tag(&tag, path) {
        Ok(()) => Outcome::Success(()),
        Err(e) => e.into(),
    }
}

/// Replace characters that are not allowed in filenames on common platforms.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Filename derived from tags: `"{title} - {artist}.mp3"`, sanitized.
///
/// Returns `None` when both title and artist are missing or blank.
#[must_use]
pub fn filename_from_tag(tag: &Tag) -> Option<String> {
    let title = tag.title().map(str::trim).unwrap_or_default();
    let artist = tag.artist().map(str::trim).unwrap_or_default();

    if title.is_empty() && artist.is_empty() {
        return None;
    }

    Some(sanitize_filename(&format!("{title} - {artist}.mp3")))
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

/// Rename `path` to [`filename_from_tag`] within the same directory.
///
/// Returns the new path on success. An existing, different file at the target
/// name is never overwritten.
pub fn rename_from_tags(path: &Path) -> Outcome<PathBuf> {
    let tag = match read_tag(path) {
        Ok(Some(tag)) => tag,
        Ok(None) => return Outcome::Skipped("No ID3 tags found".to_string()),
        Err(e) => return e.into(),
    };

    let Some(new_name) = filename_from_tag(&tag) else {
        return Outcome::Skipped("No title or artist tags found".to_string());
    };

    let current_name = file_label(path);
    if current_name == new_name {
        return Outcome::Skipped("Already named from tags".to_string());
    }

    let target = path.with_file_name(&new_name);

    // On a case-insensitive filesystem a case-only rename finds the source
    // itself at `target`; anything else there belongs to another file.
    if target.exists() {
        match is_same_file(path, &target) {
            Ok(true) => {}
            Ok(false) => {
                return Outcome::Failed(Error::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{new_name} already exists"),
                )))
            }
            Err(e) => return Outcome::Failed(e.into()),
        }
    }

    match fs::rename(path, &target) {
        Ok(()) => Outcome::Success(target),
        Err(e) => Outcome::Failed(e.into()),
    }
}
