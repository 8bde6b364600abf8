//! Handler slot shared between a feed's delivery thread and its subscriber.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{InputError, PointerEvent, PointerHandler, Subscription};

/// Holds at most one [`PointerHandler`] and serializes dispatch against detach.
///
/// The handler runs while the slot lock is held, so releasing a
/// [`Subscription`] waits for an in-flight callback to finish and no
/// callback can start after release returns.
#[derive(Default)]
pub struct FeedHub {
    slot: Mutex<Option<(u64, PointerHandler)>>,
    next_id: AtomicU64,
}

impl FeedHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bind `handler` to this hub. Only one handler may be attached at a time.
    pub fn attach(self: &Arc<Self>, handler: PointerHandler) -> Result<Subscription, InputError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut slot = self.lock();
            if slot.is_some() {
                return Err(InputError::AlreadySubscribed);
            }
            *slot = Some((id, handler));
        }

        let hub = Arc::clone(self);
        Ok(Subscription::new(move || hub.detach(id)))
    }

    /// Deliver one notification to the attached handler, if any.
    pub fn dispatch(&self, event: PointerEvent) {
        let slot = self.lock();
        if let Some((_, handler)) = slot.as_ref() {
            handler(event);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    fn detach(&self, id: u64) {
        let mut slot = self.lock();
        if matches!(slot.as_ref(), Some((current, _)) if *current == id) {
            *slot = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, PointerHandler)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FeedHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHub")
            .field("attached", &self.is_attached())
            .finish()
    }
}
