//! Status command handler

use anyhow::Result;

use automouse::files::lock::{self, LockInfo};
use automouse::{Recording, RecordingStore};

use super::format_secs;

/// Show where the recording lives, what it contains, and who holds it.
#[cfg(not(tarpaulin_include))]
pub fn handle(store: &RecordingStore) -> Result<()> {
    let recording = if store.exists() {
        Some(store.load()?)
    } else {
        None
    };
    println!(
        "{}",
        summary(store, recording.as_ref(), lock::read_lock(store.path()).as_ref())
    );
    Ok(())
}

/// Render the status block.
pub fn summary(
    store: &RecordingStore,
    recording: Option<&Recording>,
    lock: Option<&LockInfo>,
) -> String {
    let mut out = match recording {
        Some(recording) => format!(
            "Recording: {}\n   Events: {} ({} moves, {} clicks)\n   Duration: {}",
            store.path().display(),
            recording.len(),
            recording.move_count(),
            recording.click_count(),
            format_secs(recording.duration())
        ),
        None => format!("No recording at {}", store.path().display()),
    };
    if let Some(info) = lock {
        out.push_str(&format!(
            "\n   Busy: process {} is {} (since {})",
            info.pid, info.activity, info.started
        ));
    }
    out
}
