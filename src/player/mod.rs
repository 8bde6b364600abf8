//! Timed playback of the stored recording.
//!
//! [`Player::play`] loads the store, checks it is present, valid and
//! non-empty, then re-emits every event through a [`PointerController`],
//! sleeping so that each event lands at its recorded offset from a replay
//! clock that restarts every iteration.
//!
//! A failure emitting a single event is logged and skipped unless strict
//! mode is on. Anything that escapes the loop aborts the remaining
//! iterations.
//!
//! # Structure
//!
//! - `cancel` - [`CancelToken`], cooperative stop between events and during sleeps

mod cancel;

pub use cancel::CancelToken;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::event::{Event, Recording};
use crate::input::{InputError, PointerController};
use crate::store::{DecodeError, RecordingStore, StoreError};

/// Default pause between two repeat iterations.
pub const DEFAULT_REPEAT_PAUSE: Duration = Duration::from_millis(500);

/// Tuning for a [`Player`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Pause between iterations (not after the last one).
    pub repeat_pause: Duration,
    /// Wait once before the first event of the first iteration.
    pub start_delay: Duration,
    /// Abort on the first event that fails to emit instead of skipping it.
    pub strict: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat_pause: DEFAULT_REPEAT_PAUSE,
            start_delay: Duration::ZERO,
            strict: false,
        }
    }
}

/// Why a playback did not complete.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no recording found at {}", path.display())]
    NoRecording { path: PathBuf },

    #[error("recording {} is corrupt: {source}", path.display())]
    CorruptRecording {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("recording {} contains no events", path.display())]
    EmptyRecording { path: PathBuf },

    #[error("could not read recording: {0}")]
    Store(#[source] StoreError),

    #[error("could not open pointer controller: {0}")]
    Controller(#[source] InputError),

    #[error("event {index} of iteration {iteration} failed: {source}")]
    EventFailed {
        iteration: u32,
        index: usize,
        #[source]
        source: InputError,
    },

    #[error("playback cancelled after {iterations} complete iteration(s)")]
    Cancelled { iterations: u32 },

    #[error("playback aborted: {0}")]
    Aborted(String),
}

impl From<StoreError> for PlaybackError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { path } => PlaybackError::NoRecording { path },
            StoreError::Corrupt { path, source } => {
                PlaybackError::CorruptRecording { path, source }
            }
            other => PlaybackError::Store(other),
        }
    }
}

/// An event that failed to emit and was skipped.
#[derive(Debug, Clone)]
pub struct SkippedEvent {
    pub iteration: u32,
    pub index: usize,
    pub error: InputError,
}

/// Summary of a completed playback.
#[derive(Debug, Clone, Default)]
pub struct PlaybackReport {
    /// Iterations played to the end.
    pub iterations: u32,
    /// Events emitted successfully across all iterations.
    pub emitted: usize,
    pub skipped: Vec<SkippedEvent>,
    pub elapsed: Duration,
}

/// Flat `(success, message)` view of a playback result for UI collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl PlayOutcome {
    pub fn from_result(result: &Result<PlaybackReport, PlaybackError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: None,
            },
            Err(e) => Self {
                success: false,
                message: Some(e.to_string()),
            },
        }
    }

    pub fn into_pair(self) -> (bool, Option<String>) {
        (self.success, self.message)
    }
}

impl From<&Result<PlaybackReport, PlaybackError>> for PlayOutcome {
    fn from(result: &Result<PlaybackReport, PlaybackError>) -> Self {
        Self::from_result(result)
    }
}

/// Replays the stored recording through a pointer controller.
pub struct Player<C: PointerController> {
    store: RecordingStore,
    controller: C,
    settings: PlaybackSettings,
}

impl<C: PointerController> Player<C> {
    pub fn new(store: RecordingStore, controller: C, settings: PlaybackSettings) -> Self {
        Self {
            store,
            controller,
            settings,
        }
    }

    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn into_controller(self) -> C {
        self.controller
    }

    /// Whether there is anything to play.
    pub fn recording_file_exists(&self) -> bool {
        self.store.exists()
    }

    /// Play the recording `repeat_count` times. Blocks for the whole replay.
    ///
    /// A `repeat_count` of 0 succeeds without emitting anything, once the
    /// recording has passed its checks.
    pub fn play(&mut self, repeat_count: u32) -> Result<PlaybackReport, PlaybackError> {
        self.play_cancellable(repeat_count, &CancelToken::new())
    }

    /// Like [`play`](Self::play), stopping after the current event once
    /// `cancel` fires.
    pub fn play_cancellable(
        &mut self,
        repeat_count: u32,
        cancel: &CancelToken,
    ) -> Result<PlaybackReport, PlaybackError> {
        let recording = self.load()?;

        if repeat_count == 0 {
            tracing::info!("repeat count is 0, nothing to play");
            return Ok(PlaybackReport::default());
        }

        tracing::info!(
            events = recording.len(),
            duration = recording.duration(),
            repeat_count,
            "playback started"
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run(&recording, repeat_count, cancel)
        }))
        .unwrap_or_else(|payload| Err(PlaybackError::Aborted(panic_message(payload.as_ref()))));

        match &result {
            Ok(report) => tracing::info!(
                iterations = report.iterations,
                emitted = report.emitted,
                skipped = report.skipped.len(),
                elapsed = report.elapsed.as_secs_f64(),
                "playback finished"
            ),
            Err(e) => tracing::warn!(error = %e, "playback did not complete"),
        }
        result
    }

    fn load(&self) -> Result<Recording, PlaybackError> {
        let recording = self.store.load()?;
        if recording.is_empty() {
            return Err(PlaybackError::EmptyRecording {
                path: self.store.path().to_path_buf(),
            });
        }
        Ok(recording)
    }

    fn run(
        &mut self,
        recording: &Recording,
        repeat_count: u32,
        cancel: &CancelToken,
    ) -> Result<PlaybackReport, PlaybackError> {
        let started = Instant::now();
        let mut report = PlaybackReport::default();

        if !self.settings.start_delay.is_zero() && !cancel.sleep(self.settings.start_delay) {
            return Err(PlaybackError::Cancelled { iterations: 0 });
        }

        for iteration in 0..repeat_count {
            if iteration > 0 && !cancel.sleep(self.settings.repeat_pause) {
                return Err(PlaybackError::Cancelled {
                    iterations: report.iterations,
                });
            }

            // The replay clock restarts every iteration
            let iteration_start = Instant::now();
            let mut last_event_time = 0.0_f64;
            let mut clock = Duration::ZERO;

            for (index, event) in recording.events().iter().enumerate() {
                if cancel.is_cancelled() {
                    return Err(PlaybackError::Cancelled {
                        iterations: report.iterations,
                    });
                }

                let wait = event.time() - last_event_time;
                if wait > 0.0 {
                    clock = clock.saturating_add(seconds(wait));
                    let remaining = clock.saturating_sub(iteration_start.elapsed());
                    if !remaining.is_zero() && !cancel.sleep(remaining) {
                        return Err(PlaybackError::Cancelled {
                            iterations: report.iterations,
                        });
                    }
                }

                match emit(&mut self.controller, event) {
                    Ok(()) => report.emitted += 1,
                    Err(source) if self.settings.strict => {
                        return Err(PlaybackError::EventFailed {
                            iteration,
                            index,
                            source,
                        });
                    }
                    Err(error) => {
                        tracing::warn!(iteration, index, error = %error, "skipping event");
                        report.skipped.push(SkippedEvent {
                            iteration,
                            index,
                            error,
                        });
                    }
                }

                last_event_time = event.time();
            }

            report.iterations += 1;
            tracing::debug!(iteration, "iteration complete");
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }
}

/// Send one event to the controller.
fn emit<C: PointerController + ?Sized>(controller: &mut C, event: &Event) -> Result<(), InputError> {
    tracing::trace!(?event, "emit");
    match *event {
        Event::Move { x, y, .. } => controller.move_to(x, y),
        Event::Click {
            x,
            y,
            button,
            pressed,
            ..
        } => {
            controller.move_to(x, y)?;
            controller.set_button(button, pressed)
        }
    }
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure during playback".to_string()
    }
}
