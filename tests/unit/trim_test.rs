//! Tests for stop-gesture trimming

use automouse::recorder::trim::{last_click_span, remove_stop_gesture};
use automouse::{Event, MouseButton};

fn session_with_stop_click() -> Vec<Event> {
    vec![
        Event::move_to(0, 0, 0.0),
        Event::press(0, 0, MouseButton::Left, 1.0),
        Event::release(0, 0, MouseButton::Left, 1.1),
        Event::move_to(50, 50, 4.0),
        Event::move_to(90, 90, 5.5),
        Event::press(90, 90, MouseButton::Left, 6.0),
        Event::release(90, 90, MouseButton::Left, 6.1),
    ]
}

#[test]
fn stop_click_and_approach_are_removed() {
    let mut events = session_with_stop_click();
    let removed = remove_stop_gesture(&mut events, 2.0);

    // The click pair goes, then everything within 2s of the new last event
    assert_eq!(removed, 4);
    assert_eq!(events.len(), 3);
    assert_eq!(events.last().unwrap().time(), 1.1);
}

#[test]
fn last_click_span_spans_final_press_and_release() {
    assert_eq!(last_click_span(&session_with_stop_click()), Some((5, 6)));
}

#[test]
fn moves_only_still_trim_tail() {
    let mut events = vec![
        Event::move_to(0, 0, 0.0),
        Event::move_to(1, 1, 3.0),
        Event::move_to(2, 2, 4.0),
    ];
    let removed = remove_stop_gesture(&mut events, 2.0);
    assert_eq!(removed, 2);
    assert_eq!(events, vec![Event::move_to(0, 0, 0.0)]);
}

#[test]
fn nothing_to_trim_in_empty_buffer() {
    let mut events = Vec::new();
    assert_eq!(remove_stop_gesture(&mut events, 2.0), 0);
}
