//! Integration tests for the automouse binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, run_automouse, temp_fixture};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["record", "play", "status", "config", "completions"] {
        assert!(stdout.contains(command), "missing {} in:\n{}", command, stdout);
    }
}

#[test]
fn play_help_mentions_repeat_and_dry_run() {
    Command::cargo_bin("automouse")
        .unwrap()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--repeat"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn unknown_command_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_automouse(home.path(), &["replay"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("unrecognized subcommand"));
}

// ============================================================================
// Status
// ============================================================================

#[test]
fn status_without_recording_points_at_data_dir() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["status"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("No recording at"), "{}", stdout);
    assert!(stdout.contains("automouse/recording.json"), "{}", stdout);
}

#[test]
fn status_summarizes_recording() {
    let home = TempDir::new().unwrap();
    let fixture = fixtures_dir().join("two_clicks.json");
    let (stdout, _stderr, exit_code) =
        run_automouse(home.path(), &["status", "--file", fixture.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Events: 6 (2 moves, 2 clicks)"), "{}", stdout);
    assert!(stdout.contains("Duration: 0.40s"), "{}", stdout);
}

#[test]
fn status_fails_on_corrupt_recording() {
    let home = TempDir::new().unwrap();
    let fixture = fixtures_dir().join("truncated.json");
    let (_stdout, stderr, exit_code) =
        run_automouse(home.path(), &["status", "--file", fixture.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("is corrupt"), "{}", stderr);
}

// ============================================================================
// Play
// ============================================================================

#[test]
fn play_without_recording_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nothing.json");
    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay", "0", "--file", missing.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("no recording found"), "{}", stderr);
}

#[test]
fn play_empty_recording_fails() {
    let home = TempDir::new().unwrap();
    let empty = home.path().join("empty.json");
    fs::write(&empty, "[]").unwrap();
    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay", "0", "--file", empty.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("contains no events"), "{}", stderr);
}

#[test]
fn play_corrupt_recording_fails() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("truncated.json");
    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay", "0", "--file", path.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("truncated"), "{}", stderr);
}

#[test]
#[cfg_attr(miri, ignore)]
fn dry_run_prints_every_action() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    let (stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &[
            "play",
            "--dry-run",
            "--delay",
            "0",
            "-n",
            "2",
            "--file",
            path.to_str().unwrap(),
        ],
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.matches("move to (10, 20)").count(), 6);
    assert_eq!(stdout.matches("press right").count(), 2);
    assert!(
        stdout.contains("Played 2 iteration(s), 12 events"),
        "{}",
        stdout
    );
    // The lock next to the recording is gone once playback ends
    assert!(!path.with_extension("json.lock").exists());
}

#[test]
fn play_rejects_negative_delay() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--dry-run", "--delay=-1", "--file", path.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--delay"), "{}", stderr);
}

#[cfg(not(feature = "native"))]
#[test]
fn record_without_native_backend_fails_cleanly() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("rec.json");
    let (_stdout, stderr, exit_code) =
        run_automouse(home.path(), &["record", "--file", target.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("could not start recording"), "{}", stderr);
    assert!(stderr.contains("native"), "{}", stderr);
    assert!(!target.exists());
}

#[cfg(not(feature = "native"))]
#[test]
fn play_without_native_backend_fails_cleanly() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("two_clicks.json");
    let (_stdout, stderr, exit_code) = run_automouse(
        home.path(),
        &["play", "--delay", "0", "--file", path.to_str().unwrap()],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("could not open pointer controller"), "{}", stderr);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_path_is_under_home() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["config", "path"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.trim().starts_with(home.path().to_str().unwrap()));
    assert!(stdout.trim().ends_with(".config/automouse/config.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"), "{}", stdout);
    assert!(stdout.contains("repeat_pause_ms = 500"), "{}", stdout);
    assert!(stdout.contains("# recording file:"), "{}", stdout);
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let config_file = home
        .path()
        .join(".config")
        .join("automouse")
        .join("config.toml");

    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["config", "init"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("Wrote"), "{}", stdout);
    let written = fs::read_to_string(&config_file).unwrap();
    assert!(written.contains("start_delay_secs = 3.0"), "{}", written);

    fs::write(&config_file, "[playback]\nstrict = true\n").unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["config", "init"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("already exists"), "{}", stdout);
    assert_eq!(
        fs::read_to_string(&config_file).unwrap(),
        "[playback]\nstrict = true\n"
    );

    let (_stdout, _stderr, exit_code) =
        run_automouse(home.path(), &["config", "init", "--force"]);
    assert_eq!(exit_code, 0);
    assert!(fs::read_to_string(&config_file)
        .unwrap()
        .contains("strict = false"));
}

#[test]
fn configured_recording_file_is_used() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("automouse");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[storage]\nrecording_file = \"~/mine.json\"\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["status"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("mine.json"), "{}", stdout);
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("automouse");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[recording]\nstop_trim_secs = -3.0\n",
    )
    .unwrap();

    let (_stdout, stderr, exit_code) = run_automouse(home.path(), &["status"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid config"), "{}", stderr);
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_generate_script() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_automouse(home.path(), &["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_automouse"), "{}", stdout);
}
