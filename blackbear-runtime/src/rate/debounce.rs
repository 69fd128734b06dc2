use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{Error, Result};

/// Trailing-edge (or leading-edge with `immediate`) debounce.
///
/// Every call re-arms a timer on the tokio runtime captured at construction.
/// Without `immediate` the wrapped function runs once the timer expires, with
/// the argument of the last call. With `immediate` it runs synchronously on
/// the first call of a burst and the timer only marks the burst as over.
pub struct Debounced<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    immediate: bool,
    runtime: Handle,
    state: Mutex<State<A>>,
}

struct State<A> {
    timer: Option<JoinHandle<()>>,
    generation: u64,
    latest: Option<A>,
}

/// Wrap `func` so bursts of calls collapse into one invocation.
///
/// Fails with [`Error::NoRuntime`] outside a tokio runtime.
pub fn debounce<A, F>(func: F, wait: Duration, immediate: bool) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    let runtime = Handle::try_current().map_err(|_| Error::NoRuntime("debounce"))?;
    Ok(Debounced {
        inner: Arc::new(Inner {
            func: Box::new(func),
            wait,
            immediate,
            runtime,
            state: Mutex::new(State {
                timer: None,
                generation: 0,
                latest: None,
            }),
        }),
    })
}

impl<A: Send + 'static> Debounced<A> {
    /// Register a call. Returns `true` when the wrapped function ran
    /// synchronously, which only happens in `immediate` mode.
    pub fn call(&self, args: A) -> bool {
        let inner = &self.inner;
        let mut state = inner.state();

        let call_now = inner.immediate && state.timer.is_none();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);

        let sync_args = if inner.immediate {
            Some(args)
        } else {
            state.latest = Some(args);
            None
        };

        // measured from this call, not from when the timer task is first polled
        let deadline = Instant::now() + inner.wait;
        let generation = state.generation;
        let timer_inner = Arc::clone(inner);
        state.timer = Some(inner.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            timer_inner.expire(generation);
        }));
        drop(state);

        match sync_args {
            Some(args) if call_now => {
                (inner.func)(args);
                true
            }
            _ => false,
        }
    }

    /// Drop the pending trailing call, if any, and return to quiescent.
    pub fn cancel(&self) {
        let mut state = self.inner.state();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);
        state.latest = None;
    }

    /// Whether a timer is armed for the current burst.
    pub fn is_pending(&self) -> bool {
        self.inner.state().timer.is_some()
    }
}

impl<A> Inner<A> {
    fn state(&self) -> MutexGuard<'_, State<A>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire(&self, generation: u64) {
        let mut state = self.state();
        // a newer call re-armed the timer after this one woke up
        if state.generation != generation {
            return;
        }
        state.timer = None;
        let args = state.latest.take();
        drop(state);

        if !self.immediate {
            if let Some(args) = args {
                (self.func)(args);
            }
        }
    }
}

impl<A> std::fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("immediate", &self.inner.immediate)
            .finish()
    }
}
