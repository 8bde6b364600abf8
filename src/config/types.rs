//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Where the single recording lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Recording file path; `~/` is expanded. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_file: Option<String>,
}

/// Capture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Minimum spacing between recorded moves
    #[serde(default = "default_move_throttle_ms")]
    pub move_throttle_ms: u64,
    /// Trailing window dropped together with the stop click
    #[serde(default = "default_stop_trim_secs")]
    pub stop_trim_secs: f64,
}

pub fn default_move_throttle_ms() -> u64 {
    16
}

pub fn default_stop_trim_secs() -> f64 {
    2.0
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            move_throttle_ms: default_move_throttle_ms(),
            stop_trim_secs: default_stop_trim_secs(),
        }
    }
}

/// Replay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause between repeat iterations
    #[serde(default = "default_repeat_pause_ms")]
    pub repeat_pause_ms: u64,
    /// Countdown before the first event is replayed
    #[serde(default = "default_start_delay_secs")]
    pub start_delay_secs: f64,
    /// Abort on the first failed event instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

pub fn default_repeat_pause_ms() -> u64 {
    500
}

pub fn default_start_delay_secs() -> f64 {
    3.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            repeat_pause_ms: default_repeat_pause_ms(),
            start_delay_secs: default_start_delay_secs(),
            strict: false,
        }
    }
}

impl RecordingConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_seconds("recording.stop_trim_secs", self.stop_trim_secs)
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_seconds("playback.start_delay_secs", self.start_delay_secs)
    }
}

fn check_seconds(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "{} must be a non-negative number of seconds, got {}",
            field, value
        ));
    }
    Ok(())
}
