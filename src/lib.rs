//! automouse Library
//!
//! Records mouse movements and clicks into a single JSON recording and
//! replays them with the original timing.
//!
//! # Structure
//!
//! - `event` - event model and the in-memory [`Recording`]
//! - `store` - the single-slot JSON store
//! - `input` - pointer feed / controller seams, dry-run and native backends
//! - `recorder` - capture into a buffer, stop-gesture trimming, save
//! - `player` - timed replay with repeats, skipping and cancellation
//! - `session` - one-activity-at-a-time coordinator with background playback
//! - `files` - lock file next to the store
//! - `config`, `logging`, `cli`, `utils` - front-end support

pub mod cli;
pub mod config;
pub mod event;
pub mod files;
pub mod input;
pub mod logging;
pub mod player;
pub mod recorder;
pub mod session;
pub mod store;
pub mod utils;

pub use config::Config;
pub use event::{Event, MouseButton, Recording};
pub use input::{InputError, PointerController, PointerFeed};
pub use player::{CancelToken, PlayOutcome, PlaybackError, PlaybackReport, PlaybackSettings, Player};
pub use recorder::{Recorder, RecorderError, RecorderSettings, StopSummary, Toggle};
pub use session::{Activity, PlaybackHandle, Session, SessionError, SessionEvent};
pub use store::{RecordingStore, StoreError};
