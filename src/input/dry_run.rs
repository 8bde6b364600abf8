//! Controller that records actions instead of injecting them.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::{InputError, PointerAction, PointerController};
use crate::event::MouseButton;

/// An action together with when it was emitted, relative to controller creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedAction {
    pub at: Duration,
    pub action: PointerAction,
}

/// Logs every action at `info` and keeps it in a shared timeline.
///
/// Clones share the same timeline, so a clone kept by the caller can inspect
/// what a player emitted after the original was moved into it.
#[derive(Debug, Clone)]
pub struct DryRunController {
    created: Instant,
    timeline: Arc<Mutex<Vec<TimedAction>>>,
}

impl Default for DryRunController {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunController {
    pub fn new() -> Self {
        Self {
            created: Instant::now(),
            timeline: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Actions emitted so far, in order.
    pub fn actions(&self) -> Vec<PointerAction> {
        self.timeline().into_iter().map(|t| t.action).collect()
    }

    pub fn timeline(&self) -> Vec<TimedAction> {
        self.timeline
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, action: PointerAction) {
        let at = self.created.elapsed();
        tracing::info!(at = at.as_secs_f64(), "dry run: {}", action);
        self.timeline
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TimedAction { at, action });
    }
}

impl PointerController for DryRunController {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.push(PointerAction::MoveTo { x, y });
        Ok(())
    }

    fn set_button(&mut self, button: MouseButton, pressed: bool) -> Result<(), InputError> {
        self.push(if pressed {
            PointerAction::Press(button)
        } else {
            PointerAction::Release(button)
        });
        Ok(())
    }
}
