//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use automouse::input::{
    FeedHub, InputError, PointerEvent, PointerFeed, PointerHandler, Subscription,
};
use automouse::MouseButton;
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create a temporary directory with a copy of a fixture
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &temp_path)
        .unwrap_or_else(|_| panic!("Failed to copy fixture: {}", name));
    (temp_dir, temp_path)
}

/// Feed backed by a [`FeedHub`] so tests can script pointer input.
pub struct ScriptedFeed(pub Arc<FeedHub>);

impl ScriptedFeed {
    pub fn new() -> (Self, Arc<FeedHub>) {
        let hub = FeedHub::new();
        (Self(Arc::clone(&hub)), hub)
    }
}

impl PointerFeed for ScriptedFeed {
    fn subscribe(&self, handler: PointerHandler) -> Result<Subscription, InputError> {
        self.0.attach(handler)
    }
}

pub fn move_to(hub: &FeedHub, x: i32, y: i32) {
    hub.dispatch(PointerEvent::Moved { x, y });
}

/// Press and release `button` at `(x, y)`, a few milliseconds apart.
pub fn click(hub: &FeedHub, x: i32, y: i32, button: MouseButton) {
    hub.dispatch(PointerEvent::Button {
        x,
        y,
        button,
        pressed: true,
    });
    std::thread::sleep(Duration::from_millis(5));
    hub.dispatch(PointerEvent::Button {
        x,
        y,
        button,
        pressed: false,
    });
}

/// Helper to run the automouse CLI with HOME pointed at `home`
pub fn run_automouse(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_automouse"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local").join("share"))
        .env_remove("AUTOMOUSE_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute automouse");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
