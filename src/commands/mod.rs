//! Command handlers for the automouse CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod play;
pub mod record;
pub mod status;

use anyhow::Result;
use std::path::Path;

use automouse::input::{DryRunController, InputError, PointerController};
use automouse::{Config, RecordingStore};

/// Pointer feed used for recording in this build.
#[cfg(feature = "native")]
pub type Feed = automouse::input::NativeFeed;
#[cfg(not(feature = "native"))]
pub type Feed = automouse::input::NoFeed;

/// Resolve the recording store: `--file` wins over the configured path.
pub fn resolve_store(file: Option<&Path>, config: &Config) -> Result<RecordingStore> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => config.recording_file()?,
    };
    Ok(RecordingStore::new(path))
}

/// Build the controller playback injects through.
///
/// Runs on the playback thread. A dry run reuses the given observer so the
/// caller can print its timeline afterwards.
pub fn make_controller(
    dry_run: Option<DryRunController>,
) -> Result<Box<dyn PointerController>, InputError> {
    if let Some(observer) = dry_run {
        return Ok(Box::new(observer));
    }
    native_controller()
}

#[cfg(feature = "native")]
fn native_controller() -> Result<Box<dyn PointerController>, InputError> {
    Ok(Box::new(automouse::input::NativeController::new()?))
}

#[cfg(not(feature = "native"))]
fn native_controller() -> Result<Box<dyn PointerController>, InputError> {
    Err(InputError::Unsupported)
}

/// Format seconds the way every command prints durations.
pub fn format_secs(secs: f64) -> String {
    format!("{:.2}s", secs)
}
