//! Single-slot recording store.
//!
//! The store is one JSON file. [`RecordingStore::save`] replaces it
//! wholesale using a temp file + rename so a failed write never leaves a
//! truncated recording behind; [`RecordingStore::load`] reads it fully into
//! memory.
//!
//! # Structure
//!
//! - `codec` - pure encode/decode of the JSON array format

pub mod codec;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use codec::{decode, encode, DecodeError};

use crate::event::Recording;

/// Default file name inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "recording.json";

/// Errors from reading or writing the store file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no recording found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read recording {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("recording {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to serialize recording: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write recording {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle to the recording file. Cheap to clone; holds only the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingStore {
    path: PathBuf,
}

impl RecordingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a recording file is present (used to enable playback).
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decode the whole recording.
    pub fn load(&self) -> Result<Recording, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        decode(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored recording.
    ///
    /// Writes `<file>.tmp` next to the target and renames it into place.
    pub fn save(&self, recording: &Recording) -> Result<(), StoreError> {
        let bytes = encode(recording)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        tracing::info!(
            path = %self.path.display(),
            events = recording.len(),
            "recording saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}
