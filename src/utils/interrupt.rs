//! Interrupt detection for long-running front-end commands.
//!
//! Recording and playback run until the user stops them. This guard turns
//! the ways a user can do that into one flag the command loop polls:
//! - SIGINT (Ctrl+C) via ctrlc handler
//! - SIGHUP (terminal hangup) via signal_hook
//! - Parent process death (terminal force-closed)
//! - Anything else holding [`InterruptGuard::flag`], such as an Enter watcher

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shared "stop now" flag fed by signals.
pub struct InterruptGuard {
    interrupted: Arc<AtomicBool>,
    #[cfg(unix)]
    initial_ppid: u32,
}

impl Default for InterruptGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptGuard {
    /// Snapshot the current parent PID for later orphan detection.
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            #[cfg(unix)]
            initial_ppid: unsafe { libc::getppid() as u32 },
        }
    }

    /// Register SIGINT (Ctrl+C) and SIGHUP (terminal hangup) handlers.
    ///
    /// Both set the same flag. Duplicate registrations are ignored.
    pub fn register_signal_handlers(&self) {
        let flag = self.interrupted.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .ok(); // Ignore if handler already set

        #[cfg(unix)]
        {
            use signal_hook::flag::register;
            let _ = register(libc::SIGHUP, self.interrupted.clone());
        }
    }

    /// Handle to the flag for other stop sources.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Whether the flag was set or the parent process went away.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst) || self.is_orphaned()
    }

    /// Poll until `done` returns true or an interrupt arrives.
    ///
    /// Returns `true` if interrupted first.
    pub fn wait_until(&self, mut done: impl FnMut() -> bool) -> bool {
        loop {
            if done() {
                return false;
            }
            if self.is_interrupted() {
                return true;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Detect parent death by comparing current ppid against the initial snapshot.
    #[cfg(unix)]
    fn is_orphaned(&self) -> bool {
        let current_ppid = unsafe { libc::getppid() as u32 };
        current_ppid != self.initial_ppid
    }

    #[cfg(not(unix))]
    fn is_orphaned(&self) -> bool {
        false
    }
}
