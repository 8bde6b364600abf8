//! Configuration management for automouse
//!
//! The library never reads the config file itself; the front end loads a
//! [`Config`] and turns it into [`RecorderSettings`] / [`PlaybackSettings`].

mod io;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::player::PlaybackSettings;
use crate::recorder::RecorderSettings;
use crate::store::DEFAULT_FILE_NAME;

impl Config {
    /// Get the config file path (~/.config/automouse/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/automouse)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Resolve the recording file, expanding `~/`.
    ///
    /// Falls back to `<data_dir>/automouse/recording.json`.
    pub fn recording_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.storage.recording_file {
            return Ok(expand_home(file));
        }
        let data_dir = dirs::data_dir().context("Could not determine data directory")?;
        Ok(data_dir.join("automouse").join(DEFAULT_FILE_NAME))
    }

    pub fn recorder_settings(&self) -> RecorderSettings {
        RecorderSettings {
            move_throttle: Duration::from_millis(self.recording.move_throttle_ms),
            stop_trim: seconds(self.recording.stop_trim_secs),
        }
    }

    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            repeat_pause: Duration::from_millis(self.playback.repeat_pause_ms),
            start_delay: seconds(self.playback.start_delay_secs),
            strict: self.playback.strict,
        }
    }
}

/// Expand a leading `~/` against the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
