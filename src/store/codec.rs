//! JSON codec for the recording store.
//!
//! Pure functions: [`encode`] turns a [`Recording`] into the bytes written to
//! disk and [`decode`] validates and parses them back. Decoding never panics;
//! every malformed input maps onto a [`DecodeError`] variant.

use serde_json::error::Category;

use crate::event::Recording;

/// Why a store file could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("recording is truncated (unexpected end of input)")]
    Truncated,

    #[error("not a list of recorded events: {0}")]
    Shape(String),

    #[error("event {index} has invalid time {time} (must be a finite number >= 0)")]
    InvalidTime { index: usize, time: f64 },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Eof => DecodeError::Truncated,
            Category::Syntax | Category::Io => DecodeError::Syntax {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            },
            Category::Data => DecodeError::Shape(err.to_string()),
        }
    }
}

/// Serialize a recording as a pretty-printed JSON array.
pub fn encode(recording: &Recording) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(recording)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse and validate a recording.
///
/// Rejects anything that is not a JSON array of `move`/`click` objects, and
/// any event whose time is negative or not finite. Out-of-order timestamps
/// are accepted; playback clamps them.
pub fn decode(bytes: &[u8]) -> Result<Recording, DecodeError> {
    let recording: Recording = serde_json::from_slice(bytes)?;

    if let Some((index, event)) = recording
        .events()
        .iter()
        .enumerate()
        .find(|(_, e)| !e.time().is_finite() || e.time() < 0.0)
    {
        return Err(DecodeError::InvalidTime {
            index,
            time: event.time(),
        });
    }

    Ok(recording)
}
