use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::callback::FrameCallback;
use super::handle::WeakRemoveHandle;
use super::scheduler::FrameScheduler;
use super::source::FrameSource;

/// Bulk work spread across frames, `batch_size` items per frame.
///
/// The job registers one callback and removes it once the item queue is
/// exhausted, so a long list never blocks a single frame. An item whose `op`
/// panics still counts as processed; the rest of its batch continues on the
/// next frame.
#[derive(Debug, Clone)]
pub struct BatchJob {
    progress: Arc<Progress>,
    handle: Arc<Mutex<Option<WeakRemoveHandle>>>,
}

#[derive(Debug)]
struct Progress {
    total: usize,
    processed: AtomicUsize,
    finished: AtomicBool,
}

impl BatchJob {
    /// Start processing `items` through `op` on the next frame. A zero
    /// `batch_size` is treated as one.
    pub fn spawn<S, T, F>(
        scheduler: &FrameScheduler<S>,
        items: Vec<T>,
        batch_size: usize,
        op: F,
    ) -> Self
    where
        S: FrameSource,
        T: Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let batch_size = batch_size.max(1);
        let total = items.len();
        let progress = Arc::new(Progress {
            total,
            processed: AtomicUsize::new(0),
            finished: AtomicBool::new(total == 0),
        });
        let handle: Arc<Mutex<Option<WeakRemoveHandle>>> = Arc::new(Mutex::new(None));

        if total == 0 {
            return Self { progress, handle };
        }

        let queue = Mutex::new(items.into_iter());
        let callback = {
            let progress = Arc::clone(&progress);
            let handle = Arc::clone(&handle);
            FrameCallback::new(move || {
                for _ in 0..batch_size {
                    let next = lock(&queue).next();
                    let Some(item) = next else { break };
                    progress.processed.fetch_add(1, Ordering::Relaxed);
                    op(item);
                }

                if lock(&queue).as_slice().is_empty() {
                    progress.finished.store(true, Ordering::Release);
                    if let Some(handle) = lock(&handle).take() {
                        handle.remove();
                    }
                    debug!(items = progress.total, "Batch job finished");
                }
            })
        };

        // The slot only holds weak references, so clearing or dropping the
        // scheduler frees the closure along with the unprocessed items.
        // add() never ticks synchronously, so the slot is filled before the
        // first batch runs.
        *lock(&handle) = Some(scheduler.add(callback).downgrade());
        debug!(items = total, batch_size, "Batch job queued");

        Self { progress, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.progress.finished.load(Ordering::Acquire)
    }

    /// Items handed to `op` so far.
    pub fn processed(&self) -> usize {
        self.progress.processed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.progress.total
    }

    /// Stop after the current frame; unprocessed items are dropped with the
    /// callback.
    pub fn cancel(&self) {
        if let Some(handle) = lock(&self.handle).take() {
            handle.remove();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
