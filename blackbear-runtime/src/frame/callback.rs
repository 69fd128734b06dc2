use std::sync::{Arc, Weak};

use crate::error::BoxError;

pub type CallbackResult = Result<(), BoxError>;

/// Return types a frame callback may produce.
pub trait IntoCallbackResult {
    fn into_callback_result(self) -> CallbackResult;
}

impl IntoCallbackResult for () {
    fn into_callback_result(self) -> CallbackResult {
        Ok(())
    }
}

impl<E> IntoCallbackResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_callback_result(self) -> CallbackResult {
        self.map_err(Into::into)
    }
}

/// Per-frame work registered with a [`FrameScheduler`](super::FrameScheduler).
///
/// Identity is the allocation: clones compare equal, two callbacks built from
/// identical closures do not.
#[derive(Clone)]
pub struct FrameCallback {
    func: Arc<dyn Fn() -> CallbackResult + Send + Sync>,
}

impl FrameCallback {
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoCallbackResult,
    {
        Self {
            func: Arc::new(move || func().into_callback_result()),
        }
    }

    pub(crate) fn invoke(&self) -> CallbackResult {
        (self.func)()
    }

    pub(crate) fn downgrade(&self) -> WeakFrameCallback {
        WeakFrameCallback {
            func: Arc::downgrade(&self.func),
        }
    }
}

/// Refers to a callback without keeping its closure alive.
#[derive(Clone, Debug)]
pub(crate) struct WeakFrameCallback {
    func: Weak<dyn Fn() -> CallbackResult + Send + Sync>,
}

impl WeakFrameCallback {
    pub(crate) fn upgrade(&self) -> Option<FrameCallback> {
        self.func.upgrade().map(|func| FrameCallback { func })
    }
}

impl PartialEq for FrameCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for FrameCallback {}

impl std::fmt::Debug for FrameCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FrameCallback")
            .field(&Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}
