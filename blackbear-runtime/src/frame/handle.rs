use std::sync::Weak;

use super::callback::{FrameCallback, WeakFrameCallback};

pub(crate) trait Registry: Send + Sync {
    fn remove(&self, callback: &FrameCallback);
}

/// Returned by [`FrameScheduler::add`](super::FrameScheduler::add).
///
/// Dropping the handle does not unregister the callback; call
/// [`remove`](RemoveHandle::remove) to stop the per-frame work.
#[derive(Clone)]
pub struct RemoveHandle {
    registry: Weak<dyn Registry>,
    callback: FrameCallback,
}

impl RemoveHandle {
    pub(crate) fn new(registry: Weak<dyn Registry>, callback: FrameCallback) -> Self {
        Self { registry, callback }
    }

    /// Unregister the callback. Repeated calls have no further effect.
    pub fn remove(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.callback);
        }
    }

    pub fn callback(&self) -> &FrameCallback {
        &self.callback
    }

    pub(crate) fn downgrade(&self) -> WeakRemoveHandle {
        WeakRemoveHandle {
            registry: self.registry.clone(),
            callback: self.callback.downgrade(),
        }
    }
}

/// A [`RemoveHandle`] that a callback can hold for itself without keeping
/// its own closure alive.
#[derive(Clone, Debug)]
pub(crate) struct WeakRemoveHandle {
    registry: Weak<dyn Registry>,
    callback: WeakFrameCallback,
}

impl WeakRemoveHandle {
    pub(crate) fn remove(&self) {
        if let (Some(registry), Some(callback)) = (self.registry.upgrade(), self.callback.upgrade()) {
            registry.remove(&callback);
        }
    }
}

impl std::fmt::Debug for RemoveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveHandle")
            .field("callback", &self.callback)
            .field("live", &(self.registry.strong_count() > 0))
            .finish()
    }
}
