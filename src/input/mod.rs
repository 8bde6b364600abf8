//! Pointer input primitives injected into the recorder and player.
//!
//! The core never talks to the OS directly. It consumes two seams:
//!
//! - [`PointerFeed`] - subscribes a handler to live move/button notifications
//!   and hands back a [`Subscription`] that must be released to stop them.
//! - [`PointerController`] - moves the pointer and presses/releases buttons.
//!
//! # Structure
//!
//! - `hub` - [`FeedHub`], the handler slot every feed dispatches through
//! - `dry_run` - controller that logs and collects actions instead of injecting
//! - `native` - OS backend via `rdev` and `enigo` (feature `native`)

mod dry_run;
mod hub;
#[cfg(feature = "native")]
mod native;

pub use dry_run::{DryRunController, TimedAction};
pub use hub::FeedHub;
#[cfg(feature = "native")]
pub use native::{NativeController, NativeFeed};

use std::sync::Arc;

use crate::event::MouseButton;

/// Errors raised by pointer feeds and controllers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
    #[error("failed to subscribe to pointer input: {0}")]
    Subscribe(String),

    #[error("pointer input is already being captured")]
    AlreadySubscribed,

    #[error("failed to open pointer controller: {0}")]
    Connect(String),

    #[error("failed to inject pointer input: {0}")]
    Inject(String),

    #[error("this build has no native input backend (rebuild with --features native)")]
    Unsupported,
}

/// Raw notification delivered by a [`PointerFeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Moved {
        x: i32,
        y: i32,
    },
    Button {
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
    },
}

/// Callback bound to a feed at subscribe time.
///
/// Runs on whatever thread the input subsystem owns, so it must be cheap.
pub type PointerHandler = Arc<dyn Fn(PointerEvent) + Send + Sync>;

/// Live subscription to a pointer feed.
///
/// Releasing (explicitly or on drop) guarantees that no handler invocation
/// is in flight and none will start afterwards.
#[must_use = "dropping a Subscription stops the pointer feed immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Detach the handler. Blocks until any running callback returns.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Source of live pointer notifications.
pub trait PointerFeed: Send + Sync {
    /// Start delivering notifications to `handler` until the returned
    /// subscription is released.
    fn subscribe(&self, handler: PointerHandler) -> Result<Subscription, InputError>;
}

impl<F: PointerFeed + ?Sized> PointerFeed for Arc<F> {
    fn subscribe(&self, handler: PointerHandler) -> Result<Subscription, InputError> {
        (**self).subscribe(handler)
    }
}

/// Feed for sessions that never capture, and for builds without a native
/// backend. Subscribing always fails with [`InputError::Unsupported`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeed;

impl PointerFeed for NoFeed {
    fn subscribe(&self, _handler: PointerHandler) -> Result<Subscription, InputError> {
        Err(InputError::Unsupported)
    }
}

/// One primitive action emitted during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    MoveTo { x: i32, y: i32 },
    Press(MouseButton),
    Release(MouseButton),
}

impl std::fmt::Display for PointerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerAction::MoveTo { x, y } => write!(f, "move to ({}, {})", x, y),
            PointerAction::Press(button) => write!(f, "press {}", button),
            PointerAction::Release(button) => write!(f, "release {}", button),
        }
    }
}

/// Sink for synthetic pointer input.
pub trait PointerController {
    /// Set the pointer position in device pixels.
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError>;

    /// Press (`pressed = true`) or release a button at the current position.
    fn set_button(&mut self, button: MouseButton, pressed: bool) -> Result<(), InputError>;

    /// Dispatch a [`PointerAction`] onto the primitives above.
    fn apply(&mut self, action: PointerAction) -> Result<(), InputError> {
        match action {
            PointerAction::MoveTo { x, y } => self.move_to(x, y),
            PointerAction::Press(button) => self.set_button(button, true),
            PointerAction::Release(button) => self.set_button(button, false),
        }
    }
}

impl<C: PointerController + ?Sized> PointerController for Box<C> {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        (**self).move_to(x, y)
    }

    fn set_button(&mut self, button: MouseButton, pressed: bool) -> Result<(), InputError> {
        (**self).set_button(button, pressed)
    }
}
