//! In-memory capture buffer with move throttling.

use std::time::Duration;

use crate::event::Event;
use crate::input::PointerEvent;

/// Pre-allocated slots so early appends never reallocate on the feed thread.
const INITIAL_CAPACITY: usize = 4096;

/// Converts raw pointer notifications into [`Event`]s.
///
/// Moves are kept only if at least `move_throttle` has elapsed since the
/// last kept move; button transitions are always kept.
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    events: Vec<Event>,
    move_throttle: f64,
    last_move_at: Option<f64>,
}

impl CaptureBuffer {
    pub fn new(move_throttle: Duration) -> Self {
        Self {
            events: Vec::with_capacity(INITIAL_CAPACITY),
            move_throttle: move_throttle.as_secs_f64(),
            last_move_at: None,
        }
    }

    /// Ingest a notification observed `t` seconds into the recording.
    ///
    /// Returns whether the event was appended.
    pub fn ingest(&mut self, event: PointerEvent, t: f64) -> bool {
        match event {
            PointerEvent::Moved { x, y } => {
                if let Some(last) = self.last_move_at {
                    if t - last < self.move_throttle {
                        return false;
                    }
                }
                self.last_move_at = Some(t);
                self.events.push(Event::Move { x, y, time: t });
            }
            PointerEvent::Button {
                x,
                y,
                button,
                pressed,
            } => {
                self.events.push(Event::Click {
                    x,
                    y,
                    button,
                    pressed,
                    time: t,
                });
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Move the captured events out, leaving the buffer empty.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.last_move_at = None;
        std::mem::take(&mut self.events)
    }
}
