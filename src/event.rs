//! Recorded pointer events.
//!
//! A [`Recording`] is an ordered list of [`Event`]s. Each event carries the
//! number of seconds elapsed since the recording started, so the sequence is
//! time-sorted and insertion order is replay order.
//!
//! # Store format
//!
//! Events serialize as tagged JSON objects inside a flat array:
//!
//! ```text
//! [
//!   {"type":"move","x":10,"y":20,"time":0.0},
//!   {"type":"click","x":10,"y":20,"button":"left","pressed":true,"time":0.25}
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// Mouse button that can be recorded and replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
        }
    }
}

impl std::fmt::Display for MouseButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded pointer action.
///
/// `time` is seconds since the start of the recording. Coordinates are
/// device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Pointer moved to `(x, y)`.
    Move { x: i32, y: i32, time: f64 },
    /// Button pressed (`pressed = true`) or released at `(x, y)`.
    Click {
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
        time: f64,
    },
}

impl Event {
    pub fn move_to(x: i32, y: i32, time: f64) -> Self {
        Event::Move { x, y, time }
    }

    pub fn press(x: i32, y: i32, button: MouseButton, time: f64) -> Self {
        Event::Click {
            x,
            y,
            button,
            pressed: true,
            time,
        }
    }

    pub fn release(x: i32, y: i32, button: MouseButton, time: f64) -> Self {
        Event::Click {
            x,
            y,
            button,
            pressed: false,
            time,
        }
    }

    /// Seconds since recording start.
    pub fn time(&self) -> f64 {
        match self {
            Event::Move { time, .. } | Event::Click { time, .. } => *time,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        match self {
            Event::Move { x, y, .. } | Event::Click { x, y, .. } => (*x, *y),
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Event::Move { .. })
    }

    pub fn is_press(&self) -> bool {
        matches!(self, Event::Click { pressed: true, .. })
    }

    pub fn is_release(&self) -> bool {
        matches!(self, Event::Click { pressed: false, .. })
    }
}

/// An ordered, time-sorted sequence of events from one capture session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    events: Vec<Event>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the last event, or 0 for an empty recording.
    pub fn duration(&self) -> f64 {
        self.events.last().map(Event::time).unwrap_or(0.0)
    }

    pub fn move_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_move()).count()
    }

    /// Number of button presses (a press/release pair counts once).
    pub fn click_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_press()).count()
    }

    /// Whether timestamps never decrease along the sequence.
    pub fn is_time_sorted(&self) -> bool {
        self.events.windows(2).all(|w| w[0].time() <= w[1].time())
    }
}

impl From<Vec<Event>> for Recording {
    fn from(events: Vec<Event>) -> Self {
        Self::from_events(events)
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
