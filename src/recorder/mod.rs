//! Pointer recording sessions.
//!
//! A [`Recorder`] subscribes to a [`PointerFeed`], timestamps every
//! notification relative to the session start, and on stop persists the
//! buffered events to the [`RecordingStore`].
//!
//! # Structure
//!
//! - `buffer` - throttled capture buffer written from the feed thread
//! - `trim` - removal of the stop gesture before persisting

mod buffer;
pub mod trim;

pub use buffer::CaptureBuffer;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::event::Recording;
use crate::input::{InputError, PointerFeed, PointerHandler, Subscription};
use crate::store::{RecordingStore, StoreError};

/// Default move throttle (~60 Hz).
pub const DEFAULT_MOVE_THROTTLE: Duration = Duration::from_millis(16);

/// Default trailing window dropped by [`Recorder::remove_last_click`].
pub const DEFAULT_STOP_TRIM: Duration = Duration::from_secs(2);

/// Tuning for a [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecorderSettings {
    /// Minimum spacing between two recorded moves.
    pub move_throttle: Duration,
    /// Trailing window removed together with the stop gesture.
    pub stop_trim: Duration,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            move_throttle: DEFAULT_MOVE_THROTTLE,
            stop_trim: DEFAULT_STOP_TRIM,
        }
    }
}

/// Errors from starting or stopping a recording.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("could not start recording: {0}")]
    Start(#[source] InputError),

    #[error("could not save recording: {0}")]
    Save(#[source] StoreError),
}

/// What happened when a recording was stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSummary {
    /// Events persisted (after trimming).
    pub events: usize,
    /// Events removed by stop-gesture trimming.
    pub trimmed: usize,
    /// Timestamp of the last persisted event.
    pub duration: f64,
    /// Whether the store was written. Empty recordings are not saved.
    pub saved: bool,
    pub path: PathBuf,
}

/// Result of [`Recorder::toggle_recording`].
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle {
    Started,
    Stopped(StopSummary),
}

struct ActiveSession {
    subscription: Subscription,
    buffer: Arc<Mutex<CaptureBuffer>>,
    started: Instant,
    trim_stop_gesture: bool,
}

/// Records pointer activity into the single recording slot.
///
/// `start_recording` and `stop_recording` are meant to be driven from one
/// controlling thread; the feed's callbacks run on the input subsystem's
/// thread and only append to the buffer.
pub struct Recorder<F: PointerFeed> {
    feed: F,
    store: RecordingStore,
    settings: RecorderSettings,
    active: Option<ActiveSession>,
}

impl<F: PointerFeed> Recorder<F> {
    pub fn new(feed: F, store: RecordingStore, settings: RecorderSettings) -> Self {
        Self {
            feed,
            store,
            settings,
            active: None,
        }
    }

    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Events captured so far in the current session.
    pub fn captured(&self) -> usize {
        self.active
            .as_ref()
            .map(|session| lock_buffer(&session.buffer).len())
            .unwrap_or(0)
    }

    /// Seconds since the current session started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|session| session.started.elapsed())
    }

    /// Clear the buffer, start the session clock and attach to the feed.
    pub fn start_recording(&mut self) -> Result<(), RecorderError> {
        if self.active.is_some() {
            return Err(RecorderError::AlreadyRecording);
        }

        let buffer = Arc::new(Mutex::new(CaptureBuffer::new(self.settings.move_throttle)));
        let started = Instant::now();

        let sink = Arc::clone(&buffer);
        let handler: PointerHandler = Arc::new(move |event| {
            let mut buffer = lock_buffer(&sink);
            // Stamp under the lock so timestamps never go backwards
            let t = started.elapsed().as_secs_f64();
            buffer.ingest(event, t);
        });

        let subscription = self.feed.subscribe(handler).map_err(|e| {
            tracing::error!(error = %e, "failed to attach pointer feed");
            RecorderError::Start(e)
        })?;

        self.active = Some(ActiveSession {
            subscription,
            buffer,
            started,
            trim_stop_gesture: false,
        });
        tracing::info!(
            throttle_ms = self.settings.move_throttle.as_millis() as u64,
            "recording started"
        );
        Ok(())
    }

    /// Mark the trailing stop gesture for removal.
    ///
    /// Call before [`stop_recording`](Self::stop_recording) when the stop was
    /// triggered by a click. The trim itself runs in `stop_recording`, after
    /// the feed is detached: the most recent press/release span is removed,
    /// then every event within the stop-trim window of the new final
    /// timestamp.
    pub fn remove_last_click(&mut self) -> Result<(), RecorderError> {
        let session = self.active.as_mut().ok_or(RecorderError::NotRecording)?;
        session.trim_stop_gesture = true;
        Ok(())
    }

    /// Detach from the feed, trim, and persist the recording.
    ///
    /// The recorder is idle afterwards even if saving fails. An empty
    /// recording is not written, leaving any previous store untouched.
    pub fn stop_recording(&mut self) -> Result<StopSummary, RecorderError> {
        let session = self.active.take().ok_or(RecorderError::NotRecording)?;
        let ActiveSession {
            subscription,
            buffer,
            trim_stop_gesture,
            ..
        } = session;

        // After release no callback is running or will run
        subscription.release();
        let mut events = lock_buffer(&buffer).take_events();

        let trimmed = if trim_stop_gesture {
            trim::remove_stop_gesture(&mut events, self.settings.stop_trim.as_secs_f64())
        } else {
            0
        };

        let recording = Recording::from_events(events);
        let mut summary = StopSummary {
            events: recording.len(),
            trimmed,
            duration: recording.duration(),
            saved: false,
            path: self.store.path().to_path_buf(),
        };

        if recording.is_empty() {
            tracing::warn!(trimmed, "recording stopped with no events; store left unchanged");
            return Ok(summary);
        }

        self.store.save(&recording).map_err(|e| {
            tracing::error!(error = %e, "failed to save recording");
            RecorderError::Save(e)
        })?;
        summary.saved = true;

        tracing::info!(
            events = summary.events,
            trimmed = summary.trimmed,
            duration = summary.duration,
            "recording stopped"
        );
        Ok(summary)
    }

    /// Start when idle; otherwise stop.
    ///
    /// Pass `trim_stop_gesture` when the toggle itself was a click in the
    /// recorded area; a hotkey or menu stop keeps every captured event.
    pub fn toggle_recording(&mut self, trim_stop_gesture: bool) -> Result<Toggle, RecorderError> {
        if self.is_recording() {
            if trim_stop_gesture {
                self.remove_last_click()?;
            }
            self.stop_recording().map(Toggle::Stopped)
        } else {
            self.start_recording().map(|()| Toggle::Started)
        }
    }

    /// Detach and throw the buffer away without touching the store.
    pub fn abandon(&mut self) -> bool {
        match self.active.take() {
            Some(session) => {
                session.subscription.release();
                tracing::info!("recording abandoned");
                true
            }
            None => false,
        }
    }
}

fn lock_buffer(buffer: &Mutex<CaptureBuffer>) -> MutexGuard<'_, CaptureBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}
