//! Play command handler

use anyhow::{anyhow, Result};
use std::time::Duration;

use automouse::input::{DryRunController, NoFeed, TimedAction};
use automouse::utils::InterruptGuard;
use automouse::{Config, PlaybackReport, PlaybackSettings, RecordingStore, Session};

use super::{format_secs, make_controller};

/// Options given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayArgs {
    pub repeat: u32,
    pub dry_run: bool,
    pub delay: Option<f64>,
    pub strict: bool,
}

/// Replay the recording. Ctrl+C cancels after the current event.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, store: RecordingStore, args: PlayArgs) -> Result<()> {
    let settings = playback_settings(config, &args)?;
    let (session, _events) = Session::new(NoFeed, store, config.recorder_settings(), settings);

    let guard = InterruptGuard::new();
    guard.register_signal_handlers();

    if !settings.start_delay.is_zero() {
        eprintln!(
            "Starting playback in {} - Ctrl+C to cancel",
            format_secs(settings.start_delay.as_secs_f64())
        );
    }

    let observer = args.dry_run.then(DryRunController::new);
    let controller_observer = observer.clone();
    let handle = session.play(args.repeat, move || make_controller(controller_observer))?;

    if guard.wait_until(|| handle.is_finished()) {
        handle.cancel();
    }
    let result = handle.join();

    if let Some(observer) = observer {
        for line in timeline_lines(&observer.timeline()) {
            println!("{}", line);
        }
    }

    let report = result?;
    for skipped in &report.skipped {
        eprintln!(
            "Skipped event {} in iteration {}: {}",
            skipped.index + 1,
            skipped.iteration + 1,
            skipped.error
        );
    }
    println!("{}", describe(&report));
    Ok(())
}

/// Config playback settings with command-line overrides applied.
pub fn playback_settings(config: &Config, args: &PlayArgs) -> Result<PlaybackSettings> {
    let mut settings = config.playback_settings();
    if let Some(delay) = args.delay {
        settings.start_delay = Duration::try_from_secs_f64(delay)
            .map_err(|_| anyhow!("--delay must be a non-negative number of seconds"))?;
    }
    if args.strict {
        settings.strict = true;
    }
    Ok(settings)
}

/// One line per dry-run action, offset from the start of playback.
pub fn timeline_lines(timeline: &[TimedAction]) -> Vec<String> {
    timeline
        .iter()
        .map(|entry| format!("{:>9}  {}", format_secs(entry.at.as_secs_f64()), entry.action))
        .collect()
}

pub fn describe(report: &PlaybackReport) -> String {
    let mut line = format!(
        "Played {} iteration(s), {} events in {}",
        report.iterations,
        report.emitted,
        format_secs(report.elapsed.as_secs_f64())
    );
    if !report.skipped.is_empty() {
        line.push_str(&format!(" ({} skipped)", report.skipped.len()));
    }
    line
}
