//! Activity lock next to the recording store.
//!
//! While a process records or plays, it holds `<store>.lock` containing its
//! PID, the start time and the activity. Other processes refuse to record or
//! play while a live lock exists; locks left behind by dead processes are
//! cleaned up automatically.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Metadata stored in a lock file to identify the owning process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    pub pid: u32,
    pub started: String,
    pub activity: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("recording store is busy: process {} is {} (since {})", .0.pid, .0.activity, .0.started)]
    Held(LockInfo),

    #[error("failed to write lock file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Removes the lock file when dropped.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    pub fn lock_path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Get the lock file path for a given store file.
///
/// The lock path is the original path with `.lock` appended.
pub fn lock_path_for(path: &Path) -> PathBuf {
    let mut lock = path.as_os_str().to_owned();
    lock.push(".lock");
    PathBuf::from(lock)
}

/// Read lock info if the lock file exists and the owning PID is still alive.
///
/// Returns `None` if the lock file is missing, malformed, or the PID is dead.
pub fn read_lock(path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path_for(path)).ok()?;
    let info: LockInfo = serde_json::from_str(&contents).ok()?;
    if !is_pid_alive(info.pid) {
        return None;
    }
    Some(info)
}

/// Take the lock for `activity` ("recording", "playing").
///
/// Fails with [`LockError::Held`] if a live process holds it. A stale lock
/// file is removed first.
pub fn acquire(path: &Path, activity: &str) -> Result<LockGuard, LockError> {
    let lock_path = lock_path_for(path);

    if let Some(info) = read_lock(path) {
        return Err(LockError::Held(info));
    }
    if lock_path.exists() {
        tracing::warn!(path = %lock_path.display(), "removing stale lock file");
        let _ = fs::remove_file(&lock_path);
    }

    let io_err = |source| LockError::Io {
        path: lock_path.clone(),
        source,
    };

    if let Some(parent) = lock_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let info = LockInfo {
        pid: std::process::id(),
        started: chrono::Utc::now().to_rfc3339(),
        activity: activity.to_string(),
    };
    let json = serde_json::to_string(&info)
        .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    // create_new so two processes racing past the check cannot both win
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&lock_path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(match read_lock(path) {
                Some(info) => LockError::Held(info),
                None => io_err(e),
            });
        }
        Err(e) => return Err(io_err(e)),
    };
    let guard = LockGuard {
        path: lock_path.clone(),
    };
    file.write_all(json.as_bytes()).map_err(io_err)?;

    tracing::debug!(path = %lock_path.display(), activity, "lock acquired");
    Ok(guard)
}

/// Check whether a process with the given PID is still running.
///
/// Uses `kill(pid, 0)` which checks for process existence without sending a signal.
/// Returns `true` if the process exists (even if owned by another user - EPERM).
#[cfg(unix)]
pub(crate) fn is_pid_alive(pid: u32) -> bool {
    // SAFETY: kill with signal 0 only checks process existence, no signal is sent.
    let ret = unsafe { libc::kill(pid as libc::pid_t, 0) };
    if ret == 0 {
        return true;
    }
    // EPERM means the process exists but belongs to another user
    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
pub(crate) fn is_pid_alive(pid: u32) -> bool {
    pid == std::process::id()
}
