//! Coordination between recording, playback and the UI.
//!
//! A [`Session`] owns the recorder and the single recording slot. It makes
//! sure at most one of {recording, playing} is active, both within this
//! process and across processes sharing the same store (via the lock file),
//! runs playback on its own thread, and reports every state transition on a
//! channel so the UI thread can update itself without sharing state with
//! the worker.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use crate::files::lock::{self, LockError, LockGuard};
use crate::input::{InputError, PointerController, PointerFeed};
use crate::player::{
    CancelToken, PlayOutcome, PlaybackError, PlaybackReport, PlaybackSettings, Player,
};
use crate::recorder::{Recorder, RecorderError, RecorderSettings, StopSummary, Toggle};
use crate::store::RecordingStore;

/// What the session is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Recording,
    Playing,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Idle => "idle",
            Activity::Recording => "recording",
            Activity::Playing => "playing",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State transitions delivered to the UI thread.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    RecordingStarted,
    RecordingStopped(StopSummary),
    RecordingAbandoned,
    PlaybackStarted { repeat_count: u32 },
    PlaybackFinished(PlayOutcome),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot do that while {0}")]
    Busy(Activity),

    #[error(transparent)]
    Locked(#[from] LockError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error("failed to start playback thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Handle to a playback running on a background thread.
pub struct PlaybackHandle {
    cancel: CancelToken,
    thread: JoinHandle<Result<PlaybackReport, PlaybackError>>,
}

impl PlaybackHandle {
    /// Ask the playback to stop after the event in progress.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the playback to end.
    pub fn join(self) -> Result<PlaybackReport, PlaybackError> {
        self.thread
            .join()
            .unwrap_or_else(|_| Err(PlaybackError::Aborted("playback thread panicked".into())))
    }
}

/// Single-slot record/play coordinator.
pub struct Session<F: PointerFeed> {
    store: RecordingStore,
    recorder: Mutex<Recorder<F>>,
    playback: PlaybackSettings,
    activity: Arc<Mutex<Activity>>,
    record_lock: Mutex<Option<LockGuard>>,
    events: Sender<SessionEvent>,
}

impl<F: PointerFeed> Session<F> {
    /// Create a session and the receiver for its [`SessionEvent`]s.
    pub fn new(
        feed: F,
        store: RecordingStore,
        recording: RecorderSettings,
        playback: PlaybackSettings,
    ) -> (Self, Receiver<SessionEvent>) {
        let (events, rx) = mpsc::channel();
        let session = Self {
            recorder: Mutex::new(Recorder::new(feed, store.clone(), recording)),
            store,
            playback,
            activity: Arc::new(Mutex::new(Activity::Idle)),
            record_lock: Mutex::new(None),
            events,
        };
        (session, rx)
    }

    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    pub fn activity(&self) -> Activity {
        *lock_ignoring_poison(&self.activity)
    }

    /// Whether there is a recording to play (UI enables playback on this).
    pub fn recording_file_exists(&self) -> bool {
        self.store.exists()
    }

    /// Events captured so far while recording.
    pub fn captured(&self) -> usize {
        lock_ignoring_poison(&self.recorder).captured()
    }

    pub fn start_recording(&self) -> Result<(), SessionError> {
        let mut activity = lock_ignoring_poison(&self.activity);
        if *activity != Activity::Idle {
            return Err(SessionError::Busy(*activity));
        }

        let guard = lock::acquire(self.store.path(), Activity::Recording.as_str())?;
        lock_ignoring_poison(&self.recorder).start_recording()?;

        *lock_ignoring_poison(&self.record_lock) = Some(guard);
        *activity = Activity::Recording;
        self.notify(SessionEvent::RecordingStarted);
        Ok(())
    }

    /// See [`Recorder::remove_last_click`].
    pub fn remove_last_click(&self) -> Result<(), SessionError> {
        lock_ignoring_poison(&self.recorder).remove_last_click()?;
        Ok(())
    }

    /// Stop recording and persist. The session is idle afterwards even if
    /// saving failed.
    pub fn stop_recording(&self) -> Result<StopSummary, SessionError> {
        let mut activity = lock_ignoring_poison(&self.activity);
        if *activity != Activity::Recording {
            return Err(SessionError::Recorder(RecorderError::NotRecording));
        }

        let result = lock_ignoring_poison(&self.recorder).stop_recording();
        *activity = Activity::Idle;
        lock_ignoring_poison(&self.record_lock).take();

        let summary = result?;
        self.notify(SessionEvent::RecordingStopped(summary.clone()));
        Ok(summary)
    }

    /// Start when idle; when recording, stop. See
    /// [`Recorder::toggle_recording`] for `trim_stop_gesture`.
    pub fn toggle_recording(&self, trim_stop_gesture: bool) -> Result<Toggle, SessionError> {
        match self.activity() {
            Activity::Recording => {
                if trim_stop_gesture {
                    self.remove_last_click()?;
                }
                self.stop_recording().map(Toggle::Stopped)
            }
            _ => self.start_recording().map(|()| Toggle::Started),
        }
    }

    /// Discard the current recording without saving.
    pub fn abandon_recording(&self) -> bool {
        let mut activity = lock_ignoring_poison(&self.activity);
        if *activity != Activity::Recording {
            return false;
        }
        lock_ignoring_poison(&self.recorder).abandon();
        *activity = Activity::Idle;
        lock_ignoring_poison(&self.record_lock).take();
        self.notify(SessionEvent::RecordingAbandoned);
        true
    }

    /// Play the recording `repeat_count` times on a background thread.
    ///
    /// `make_controller` runs on that thread, so controllers that must stay
    /// on the thread that created them are fine.
    pub fn play<C, M>(
        &self,
        repeat_count: u32,
        make_controller: M,
    ) -> Result<PlaybackHandle, SessionError>
    where
        C: PointerController,
        M: FnOnce() -> Result<C, InputError> + Send + 'static,
    {
        let mut activity = lock_ignoring_poison(&self.activity);
        if *activity != Activity::Idle {
            return Err(SessionError::Busy(*activity));
        }
        let guard = lock::acquire(self.store.path(), Activity::Playing.as_str())?;

        let cancel = CancelToken::new();
        let token = cancel.clone();
        let store = self.store.clone();
        let settings = self.playback;
        let shared_activity = Arc::clone(&self.activity);
        let events = self.events.clone();

        *activity = Activity::Playing;
        self.notify(SessionEvent::PlaybackStarted { repeat_count });

        // The worker resets the activity under the same mutex, so it waits
        // for this guard to drop
        let spawned = std::thread::Builder::new()
            .name("automouse-playback".to_string())
            .spawn(move || {
                let result = make_controller()
                    .map_err(PlaybackError::Controller)
                    .and_then(|controller| {
                        Player::new(store, controller, settings)
                            .play_cancellable(repeat_count, &token)
                    });

                // Release the lock file before going idle so a caller that
                // sees Idle can take it straight away
                drop(guard);
                *lock_ignoring_poison(&shared_activity) = Activity::Idle;
                let _ = events.send(SessionEvent::PlaybackFinished(PlayOutcome::from_result(
                    &result,
                )));
                result
            });

        match spawned {
            Ok(thread) => Ok(PlaybackHandle { cancel, thread }),
            Err(e) => {
                *activity = Activity::Idle;
                Err(SessionError::Spawn(e))
            }
        }
    }

    fn notify(&self, event: SessionEvent) {
        // Nobody listening is fine
        let _ = self.events.send(event);
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
