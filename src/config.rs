//! # Configuration Module
//!
//! Optional user configuration for Tunesmith, stored as JSON in the
//! platform-standard config directory:
//! - Linux: `~/.config/tunesmith/config.json`
//! - macOS: `~/Library/Application Support/tunesmith/config.json`
//! - Windows: `%APPDATA%\tunesmith\config.json`
//!
//! A missing file is not an error; every field falls back to its default.
//! Command-line flags take precedence over the file.
//!
//! ```json
//! { "encoder": "/opt/ffmpeg/bin/ffmpeg", "threads": 8 }
//! ```

use crate::dispatcher::DEFAULT_THREADS;
use crate::encoder::DEFAULT_ENCODER;
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate path of the config file.
///
/// Unlike a data directory, nothing is created here: the file is only read.
///
/// # Errors
///
/// Fails if the system config directory cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a config file."
        )
    })?;

    Ok(config_dir.join("tunesmith").join("config.json"))
}

/// Settings that shape a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Encoder program name or path.
    pub encoder: String,
    /// Parallel encoder processes for `convert`.
    pub threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            encoder: DEFAULT_ENCODER.to_string(),
            threads: DEFAULT_THREADS,
        }
    }
}

impl RuntimeConfig {
    /// Load from `path`, or from [`get_config_path`] when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// sets `threads` to zero.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match get_config_path() {
                Ok(path) => path,
                Err(e) => {
                    debug!("No config directory, using defaults: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Parse a config file that is expected to exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if config.threads == 0 {
            anyhow::bail!("Invalid config file {}: threads must be at least 1", path.display());
        }

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, encoder: Option<String>, threads: Option<usize>) -> Self {
        if let Some(encoder) = encoder {
            self.encoder = encoder;
        }
        if let Some(threads) = threads {
            self.threads = threads;
        }
        self
    }
}
