//! Log output for the command-line front end.
//!
//! Library code only emits `tracing` events; this installs the subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive (e.g. `automouse=debug`).
pub const LOG_ENV: &str = "AUTOMOUSE_LOG";

/// Level used when `LOG_ENV` is unset, from the number of `-v` flags.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global stderr subscriber. Calling twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
