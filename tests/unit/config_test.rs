//! Tests for configuration parsing

use std::time::Duration;

use automouse::config::{PlaybackConfig, RecordingConfig};
use automouse::Config;

#[test]
fn full_config_parses() {
    let config: Config = toml::from_str(
        r#"
[storage]
recording_file = "/data/mouse.json"

[recording]
move_throttle_ms = 8
stop_trim_secs = 1.0

[playback]
repeat_pause_ms = 250
start_delay_secs = 0.0
strict = true
"#,
    )
    .unwrap();

    assert_eq!(config.storage.recording_file.as_deref(), Some("/data/mouse.json"));
    assert_eq!(config.recorder_settings().move_throttle, Duration::from_millis(8));
    assert_eq!(config.recorder_settings().stop_trim, Duration::from_secs(1));

    let playback = config.playback_settings();
    assert_eq!(playback.repeat_pause, Duration::from_millis(250));
    assert!(playback.start_delay.is_zero());
    assert!(playback.strict);
}

#[test]
fn empty_config_is_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert!(config.storage.recording_file.is_none());
}

#[test]
fn default_recording_file_lives_in_data_dir() {
    let path = Config::default().recording_file().unwrap();
    assert!(path.ends_with("automouse/recording.json"), "{:?}", path);
}

#[test]
fn validation_rejects_nan_and_negative() {
    let recording = RecordingConfig {
        stop_trim_secs: f64::NAN,
        ..RecordingConfig::default()
    };
    assert!(recording.validate().is_err());

    let playback = PlaybackConfig {
        start_delay_secs: -0.5,
        ..PlaybackConfig::default()
    };
    assert!(playback.validate().is_err());
    assert!(PlaybackConfig::default().validate().is_ok());
}

#[test]
fn unset_recording_file_is_not_serialized() {
    let text = toml::to_string_pretty(&Config::default()).unwrap();
    assert!(!text.contains("recording_file"));
    assert!(text.contains("move_throttle_ms = 16"));
}
