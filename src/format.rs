//! Audio formats the tool knows how to find and produce.

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Flac,
    Mp3,
}

impl AudioFormat {
    /// Canonical lowercase extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            AudioFormat::Flac => "flac",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Whether `path` carries this format's extension, ignoring case.
    #[must_use]
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFormat::Flac => f.write_str("FLAC"),
            AudioFormat::Mp3 => f.write_str("MP3"),
        }
    }
}
