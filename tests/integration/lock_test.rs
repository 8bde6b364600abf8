//! The store lock as seen by other automouse processes

use std::fs;

use automouse::files::lock;
use tempfile::TempDir;

use crate::helpers::{run_automouse, temp_fixture};

#[test]
fn play_refuses_while_another_process_holds_the_store() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    // This test process is alive, so its lock counts as held
    let _guard = lock::acquire(&path, "recording").unwrap();

    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay", "0", "--file", path.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("busy"), "{}", stderr);
    assert!(stderr.contains("recording"), "{}", stderr);
}

#[test]
fn status_shows_lock_holder() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    let _guard = lock::acquire(&path, "playing").unwrap();

    let (stdout, _stderr, exit_code) =
        run_automouse(home.path(), &["status", "--file", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(
        stdout.contains(&format!("Busy: process {} is playing", std::process::id())),
        "{}",
        stdout
    );
}

#[cfg(unix)]
#[test]
fn stale_lock_does_not_block_playback() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    fs::write(
        lock::lock_path_for(&path),
        r#"{"pid":999999999,"started":"2025-01-01T00:00:00Z","activity":"recording"}"#,
    )
    .unwrap();

    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay", "0", "--file", path.to_str().unwrap()],
    );

    assert_eq!(exit_code, 0, "{}", stderr);
    assert!(!lock::lock_path_for(&path).exists());
}
