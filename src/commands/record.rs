//! Record command handler

use anyhow::Result;
use std::io::{self, BufRead};
use std::sync::atomic::Ordering;

use automouse::utils::InterruptGuard;
use automouse::{Config, RecordingStore, Session, StopSummary};

use super::{format_secs, Feed};

/// Record until Enter or Ctrl+C, then save.
///
/// With `trim_last_click`, the final click and the trailing window before
/// it are dropped (useful when the stop gesture was a click in another
/// window).
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, store: RecordingStore, trim_last_click: bool) -> Result<()> {
    let (session, _events) = Session::new(
        Feed::default(),
        store,
        config.recorder_settings(),
        config.playback_settings(),
    );

    let guard = InterruptGuard::new();
    guard.register_signal_handlers();

    session.start_recording()?;
    println!(
        "Recording to {} - press Enter or Ctrl+C to stop",
        session.store().path().display()
    );

    let stop = guard.flag();
    std::thread::spawn(move || {
        let mut line = String::new();
        // EOF means no terminal to read from; only a signal stops then
        if matches!(io::stdin().lock().read_line(&mut line), Ok(n) if n > 0) {
            stop.store(true, Ordering::SeqCst);
        }
    });
    guard.wait_until(|| false);

    if trim_last_click {
        session.remove_last_click()?;
    }
    let summary = session.stop_recording()?;
    println!("{}", describe(&summary));
    Ok(())
}

/// One-line result of a stopped recording.
pub fn describe(summary: &StopSummary) -> String {
    let mut line = if summary.saved {
        format!(
            "Saved {} events ({}) to {}",
            summary.events,
            format_secs(summary.duration),
            summary.path.display()
        )
    } else {
        "Nothing recorded; previous recording kept".to_string()
    };
    if summary.trimmed > 0 {
        line.push_str(&format!(" [{} trailing events trimmed]", summary.trimmed));
    }
    line
}
