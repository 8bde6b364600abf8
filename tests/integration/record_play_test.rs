//! End-to-end recording and playback through the library API

use std::time::{Duration, Instant};

use automouse::input::{DryRunController, InputError, PointerAction, PointerController};
use automouse::{
    Event, MouseButton, PlaybackError, PlaybackSettings, Player, Recorder, RecorderSettings,
    Recording, RecordingStore,
};
use tempfile::TempDir;

use crate::helpers::{click, move_to, ScriptedFeed};

fn immediate() -> PlaybackSettings {
    PlaybackSettings {
        start_delay: Duration::ZERO,
        ..PlaybackSettings::default()
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn three_clicks_are_recorded_and_replayed_in_order() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    let (feed, hub) = ScriptedFeed::new();
    let mut recorder = Recorder::new(feed, store.clone(), RecorderSettings::default());

    recorder.start_recording().unwrap();
    for (i, pos) in [10, 20, 30].into_iter().enumerate() {
        if i > 0 {
            std::thread::sleep(Duration::from_millis(100));
        }
        click(&hub, pos, pos, MouseButton::Left);
    }
    let summary = recorder.stop_recording().unwrap();
    assert!(summary.saved);
    assert_eq!(summary.events, 6);

    let recording = store.load().unwrap();
    assert_eq!(recording.click_count(), 3);
    assert!(recording.is_time_sorted());
    let positions: Vec<_> = recording.events().iter().map(Event::position).collect();
    assert_eq!(
        positions,
        vec![(10, 10), (10, 10), (20, 20), (20, 20), (30, 30), (30, 30)]
    );

    let observer = DryRunController::new();
    let mut player = Player::new(store, observer.clone(), immediate());
    let report = player.play(1).unwrap();
    assert_eq!(report.emitted, 6);

    let presses: Vec<_> = observer
        .actions()
        .windows(2)
        .filter_map(|pair| match pair {
            [PointerAction::MoveTo { x, y }, PointerAction::Press(MouseButton::Left)] => {
                Some((*x, *y))
            }
            _ => None,
        })
        .collect();
    assert_eq!(presses, vec![(10, 10), (20, 20), (30, 30)]);
}

#[test]
#[cfg_attr(miri, ignore)]
fn repeats_restart_the_clock_and_pause_between_iterations() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    store
        .save(&Recording::from_events(vec![
            Event::move_to(5, 5, 0.0),
            Event::press(6, 6, MouseButton::Left, 0.2),
        ]))
        .unwrap();

    let observer = DryRunController::new();
    let mut player = Player::new(store, observer.clone(), immediate());
    let started = Instant::now();
    let report = player.play(2).unwrap();

    assert!(started.elapsed() >= Duration::from_millis(900));
    assert_eq!(report.iterations, 2);
    assert_eq!(report.emitted, 4);
    assert_eq!(
        observer.actions(),
        vec![
            PointerAction::MoveTo { x: 5, y: 5 },
            PointerAction::MoveTo { x: 6, y: 6 },
            PointerAction::Press(MouseButton::Left),
            PointerAction::MoveTo { x: 5, y: 5 },
            PointerAction::MoveTo { x: 6, y: 6 },
            PointerAction::Press(MouseButton::Left),
        ]
    );

    // The second iteration starts from zero again, after the pause
    let timeline = observer.timeline();
    assert!(timeline[3].at >= Duration::from_millis(700));
}

#[test]
#[cfg_attr(miri, ignore)]
fn out_of_order_times_never_wait_backwards() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    store
        .save(&Recording::from_events(vec![
            Event::move_to(0, 0, 0.3),
            Event::move_to(1, 1, 0.1),
            Event::move_to(2, 2, 0.1),
        ]))
        .unwrap();

    let mut player = Player::new(store, DryRunController::new(), immediate());
    let started = Instant::now();
    let report = player.play(1).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(report.emitted, 3);
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(1500), "{:?}", elapsed);
}

/// Rejects every button action, as an input layer without permission would.
struct NoButtons(DryRunController);

impl PointerController for NoButtons {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.0.move_to(x, y)
    }

    fn set_button(&mut self, _button: MouseButton, _pressed: bool) -> Result<(), InputError> {
        Err(InputError::Inject("button injection denied".into()))
    }
}

fn moves_and_a_click(store: &RecordingStore) {
    store
        .save(&Recording::from_events(vec![
            Event::move_to(0, 0, 0.0),
            Event::press(1, 1, MouseButton::Right, 0.01),
            Event::move_to(2, 2, 0.02),
        ]))
        .unwrap();
}

#[test]
fn failed_events_are_skipped_and_reported() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    moves_and_a_click(&store);

    let observer = DryRunController::new();
    let mut player = Player::new(store, NoButtons(observer.clone()), immediate());
    let report = player.play(1).unwrap();

    assert_eq!(report.emitted, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    // Playback carried on past the failure
    assert_eq!(
        observer.actions().last(),
        Some(&PointerAction::MoveTo { x: 2, y: 2 })
    );
}

#[test]
fn strict_mode_stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    moves_and_a_click(&store);

    let settings = PlaybackSettings {
        strict: true,
        ..immediate()
    };
    let mut player = Player::new(store, NoButtons(DryRunController::new()), settings);
    match player.play(1) {
        Err(PlaybackError::EventFailed { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected EventFailed, got {:?}", other),
    }
}

#[test]
fn missing_recording_is_a_result_not_a_panic() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("missing.json"));
    let mut player = Player::new(store, DryRunController::new(), immediate());

    let outcome = automouse::PlayOutcome::from_result(&player.play(1));
    let (success, message) = outcome.into_pair();
    assert!(!success);
    assert!(message.unwrap().starts_with("no recording"));
}

#[test]
#[cfg_attr(miri, ignore)]
fn moves_closer_than_throttle_are_dropped() {
    let temp = TempDir::new().unwrap();
    let store = RecordingStore::new(temp.path().join("recording.json"));
    let (feed, hub) = ScriptedFeed::new();
    let settings = RecorderSettings {
        move_throttle: Duration::from_secs(10),
        ..RecorderSettings::default()
    };
    let mut recorder = Recorder::new(feed, store.clone(), settings);

    recorder.start_recording().unwrap();
    move_to(&hub, 1, 1);
    move_to(&hub, 2, 2);
    click(&hub, 3, 3, MouseButton::Left);
    recorder.stop_recording().unwrap();

    let recording = store.load().unwrap();
    assert_eq!(recording.move_count(), 1);
    assert_eq!(recording.click_count(), 1);
    assert_eq!(recording.len(), 3);
}
