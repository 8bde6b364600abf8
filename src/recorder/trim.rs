//! Post-hoc trimming of the stop gesture.
//!
//! When a recording is stopped by clicking (a menu item, a tray icon), the
//! stopping click and the motion towards it end up in the buffer. These
//! helpers strip them before the recording is persisted.

use crate::event::Event;

/// Locate the span covering the most recent press and the most recent release.
///
/// The two need not be adjacent or belong to the same button. Returns the
/// inclusive `(start, end)` indices, or `None` unless both exist.
pub fn last_click_span(events: &[Event]) -> Option<(usize, usize)> {
    let press = events.iter().rposition(Event::is_press)?;
    let release = events.iter().rposition(Event::is_release)?;
    Some((press.min(release), press.max(release)))
}

/// Drop every event within `window` seconds of the final timestamp.
///
/// The final event itself always falls inside the window. Returns how many
/// events were removed.
pub fn trim_tail(events: &mut Vec<Event>, window: f64) -> usize {
    let Some(last) = events.last().map(Event::time) else {
        return 0;
    };
    let cutoff = last - window;
    let before = events.len();
    events.retain(|e| e.time() < cutoff);
    before - events.len()
}

/// Remove the last press/release span, then the trailing `window` seconds.
///
/// Returns how many events were removed in total. An empty buffer is left
/// untouched.
pub fn remove_stop_gesture(events: &mut Vec<Event>, window: f64) -> usize {
    let mut removed = 0;
    if let Some((start, end)) = last_click_span(events) {
        events.drain(start..=end);
        removed += end - start + 1;
    }
    removed + trim_tail(events, window)
}
