//! OS pointer backend: `rdev` for listening, `enigo` for injection.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::{FeedHub, InputError, PointerController, PointerEvent, PointerHandler, Subscription};
use crate::event::MouseButton;

/// How long to wait for `rdev::listen` to fail before assuming it is running.
const LISTEN_STARTUP_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
enum ListenerState {
    NotStarted,
    Running,
    Failed(String),
}

/// Global pointer listener backed by `rdev::listen`.
///
/// `rdev` cannot stop a listener once started, so the listener thread is
/// spawned on first subscribe and lives for the rest of the process.
/// Subscriptions attach to and detach from the [`FeedHub`] it feeds.
pub struct NativeFeed {
    hub: Arc<FeedHub>,
    state: Mutex<ListenerState>,
}

impl Default for NativeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeFeed {
    pub fn new() -> Self {
        Self {
            hub: FeedHub::new(),
            state: Mutex::new(ListenerState::NotStarted),
        }
    }

    fn ensure_listener(&self) -> Result<(), InputError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            ListenerState::Running => return Ok(()),
            ListenerState::Failed(reason) => return Err(InputError::Subscribe(reason.clone())),
            ListenerState::NotStarted => {}
        }

        let hub = Arc::clone(&self.hub);
        let (err_tx, err_rx) = mpsc::channel::<String>();
        std::thread::Builder::new()
            .name("automouse-pointer-feed".to_string())
            .spawn(move || {
                let (mut x, mut y) = (0i32, 0i32);
                let result = rdev::listen(move |event| match event.event_type {
                    rdev::EventType::MouseMove { x: mx, y: my } => {
                        x = mx.round() as i32;
                        y = my.round() as i32;
                        hub.dispatch(PointerEvent::Moved { x, y });
                    }
                    rdev::EventType::ButtonPress(button) => {
                        if let Some(button) = map_button(button) {
                            hub.dispatch(PointerEvent::Button {
                                x,
                                y,
                                button,
                                pressed: true,
                            });
                        }
                    }
                    rdev::EventType::ButtonRelease(button) => {
                        if let Some(button) = map_button(button) {
                            hub.dispatch(PointerEvent::Button {
                                x,
                                y,
                                button,
                                pressed: false,
                            });
                        }
                    }
                    _ => {}
                });
                let reason = match result {
                    Ok(()) => "pointer listener exited".to_string(),
                    Err(e) => format!("{:?}", e),
                };
                tracing::error!(%reason, "pointer listener stopped");
                let _ = err_tx.send(reason);
            })
            .map_err(|e| InputError::Subscribe(e.to_string()))?;

        match err_rx.recv_timeout(LISTEN_STARTUP_GRACE) {
            Ok(reason) => {
                *state = ListenerState::Failed(reason.clone());
                Err(InputError::Subscribe(reason))
            }
            Err(_) => {
                tracing::debug!("pointer listener running");
                *state = ListenerState::Running;
                Ok(())
            }
        }
    }
}

impl super::PointerFeed for NativeFeed {
    fn subscribe(&self, handler: PointerHandler) -> Result<Subscription, InputError> {
        self.ensure_listener()?;
        self.hub.attach(handler)
    }
}

fn map_button(button: rdev::Button) -> Option<MouseButton> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left),
        rdev::Button::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Pointer injector backed by `enigo`.
pub struct NativeController {
    enigo: enigo::Enigo,
}

impl NativeController {
    pub fn new() -> Result<Self, InputError> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| InputError::Connect(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl PointerController for NativeController {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        use enigo::Mouse;
        self.enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| InputError::Inject(e.to_string()))
    }

    fn set_button(&mut self, button: MouseButton, pressed: bool) -> Result<(), InputError> {
        use enigo::Mouse;
        let button = match button {
            MouseButton::Left => enigo::Button::Left,
            MouseButton::Right => enigo::Button::Right,
        };
        let direction = if pressed {
            enigo::Direction::Press
        } else {
            enigo::Direction::Release
        };
        self.enigo
            .button(button, direction)
            .map_err(|e| InputError::Inject(e.to_string()))
    }
}
