use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

use crate::error::{Error, Result};

/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

/// Work to run on the next frame. Receives the id it was requested under.
pub type FrameTask = Box<dyn FnOnce(FrameRequestId) + Send + 'static>;

/// The display refresh signal.
///
/// `request_frame` schedules `task` for the next frame and must never run it
/// before returning.
pub trait FrameSource: Send + Sync + 'static {
    fn request_frame(&self, task: FrameTask) -> FrameRequestId;

    /// Drop a request that has not fired yet. Unknown ids are ignored.
    fn cancel_frame(&self, id: FrameRequestId);
}

#[derive(Debug, Default)]
struct IdGen(AtomicU64);

impl IdGen {
    fn next(&self) -> FrameRequestId {
        FrameRequestId(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Frames driven by the host: every [`fire`](ManualFrames::fire) is one vsync.
///
/// Clones share the same queue, so a host can keep one clone to fire frames
/// while the scheduler owns another.
#[derive(Clone, Default)]
pub struct ManualFrames {
    shared: Arc<ManualShared>,
}

#[derive(Default)]
struct ManualShared {
    ids: IdGen,
    requested: AtomicU64,
    pending: Mutex<Vec<(FrameRequestId, FrameTask)>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every request pending at the start of this frame. Requests made
    /// while firing wait for the next frame. Returns how many tasks ran.
    pub fn fire(&self) -> usize {
        let due = std::mem::take(&mut *lock(&self.shared.pending));
        let count = due.len();
        for (id, task) in due {
            task(id);
        }
        count
    }

    pub fn pending(&self) -> usize {
        lock(&self.shared.pending).len()
    }

    /// Total requests ever issued, cancelled ones included.
    pub fn requested(&self) -> u64 {
        self.shared.requested.load(Ordering::Relaxed)
    }
}

impl FrameSource for ManualFrames {
    fn request_frame(&self, task: FrameTask) -> FrameRequestId {
        let id = self.shared.ids.next();
        self.shared.requested.fetch_add(1, Ordering::Relaxed);
        lock(&self.shared.pending).push((id, task));
        id
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        lock(&self.shared.pending).retain(|(pending, _)| *pending != id);
    }
}

impl std::fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualFrames")
            .field("pending", &self.pending())
            .field("requested", &self.requested())
            .finish()
    }
}

/// Frames driven by tokio timers, one every `interval`.
pub struct IntervalFrames {
    interval: Duration,
    runtime: Handle,
    ids: IdGen,
    timers: Arc<Mutex<HashMap<FrameRequestId, JoinHandle<()>>>>,
}

impl IntervalFrames {
    /// Fails with [`Error::NoRuntime`] outside a tokio runtime.
    pub fn new(interval: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime("interval frames"))?;
        Ok(Self {
            interval,
            runtime,
            ids: IdGen::default(),
            timers: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pending(&self) -> usize {
        lock(&self.timers).len()
    }
}

impl FrameSource for IntervalFrames {
    fn request_frame(&self, task: FrameTask) -> FrameRequestId {
        let id = self.ids.next();
        let interval = self.interval;
        let deadline = Instant::now() + interval;
        let timers = Arc::clone(&self.timers);

        // Holding the map lock across spawn keeps the task from removing its
        // entry before it was inserted.
        let mut map = lock(&self.timers);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if lock(&timers).remove(&id).is_some() {
                task(id);
            }
        });
        map.insert(id, handle);
        trace!(?id, ?interval, "Frame requested");
        id
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        if let Some(handle) = lock(&self.timers).remove(&id) {
            handle.abort();
            trace!(?id, "Frame cancelled");
        }
    }
}

impl Drop for IntervalFrames {
    fn drop(&mut self) {
        for (_, handle) in lock(&self.timers).drain() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for IntervalFrames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalFrames")
            .field("interval", &self.interval)
            .field("pending", &self.pending())
            .finish()
    }
}
