use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, error};

use super::callback::FrameCallback;
use super::handle::{Registry, RemoveHandle};
use super::source::{FrameRequestId, FrameSource, ManualFrames};

/// Whether the frame loop currently has a request outstanding or a tick in
/// progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Runs every registered callback once per frame.
///
/// The loop requests a frame from its [`FrameSource`] when the first callback
/// is added and stops requesting once the last one is removed, so an empty
/// scheduler never keeps a timer alive. Cloning yields another handle to the
/// same registry.
pub struct FrameScheduler<S: FrameSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    callbacks: Vec<Entry>,
    next_seq: u64,
    pending: Option<FrameRequestId>,
    in_tick: bool,
    ticks: u64,
}

/// A registration. Re-adding a removed callback yields a new `seq`.
#[derive(Clone)]
struct Entry {
    callback: FrameCallback,
    seq: u64,
}

impl State {
    fn contains(&self, callback: &FrameCallback) -> bool {
        self.callbacks.iter().any(|e| e.callback == *callback)
    }

    fn is_registered(&self, entry: &Entry) -> bool {
        self.callbacks
            .iter()
            .any(|e| e.seq == entry.seq && e.callback == entry.callback)
    }

    fn push(&mut self, callback: FrameCallback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.callbacks.push(Entry { callback, seq });
    }
}

impl FrameScheduler<ManualFrames> {
    /// Scheduler over a host-driven frame source. Returns the source too so
    /// the host can fire frames.
    pub fn manual() -> (Self, ManualFrames) {
        let frames = ManualFrames::new();
        (Self::new(frames.clone()), frames)
    }
}

impl<S: FrameSource> FrameScheduler<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Register `callback` for every frame until removed. Adding a callback
    /// that is already registered only returns another handle for it.
    pub fn add(&self, callback: FrameCallback) -> RemoveHandle {
        {
            let mut state = self.inner.state();
            if !state.contains(&callback) {
                state.push(callback.clone());
            }
            Inner::start(&self.inner, &mut state);
        }

        let registry: Arc<dyn Registry> = self.inner.clone();
        RemoveHandle::new(Arc::downgrade(&registry), callback)
    }

    /// Unregister `callback`. Stops the loop if nothing is left.
    pub fn remove(&self, callback: &FrameCallback) {
        self.inner.remove(callback);
    }

    /// Unregister everything and stop the loop.
    pub fn clear(&self) {
        let mut state = self.inner.state();
        state.callbacks.clear();
        self.inner.stop(&mut state);
    }

    pub fn len(&self) -> usize {
        self.inner.state().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state().callbacks.is_empty()
    }

    pub fn run_state(&self) -> RunState {
        let state = self.inner.state();
        if state.pending.is_some() || state.in_tick {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Number of frames processed so far.
    pub fn ticks(&self) -> u64 {
        self.inner.state().ticks
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }
}

impl<S: FrameSource> Clone for FrameScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FrameSource> std::fmt::Debug for FrameScheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.len())
            .field("run_state", &self.run_state())
            .field("ticks", &self.ticks())
            .finish()
    }
}

impl<S: FrameSource> Inner<S> {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // A tick in progress issues its own follow-up request when it finishes.
    fn start(this: &Arc<Self>, state: &mut State) {
        if state.pending.is_some() || state.in_tick || state.callbacks.is_empty() {
            return;
        }
        Self::request_next(this, state);
        debug!(callbacks = state.callbacks.len(), "Frame loop started");
    }

    fn request_next(this: &Arc<Self>, state: &mut State) {
        let weak: Weak<Self> = Arc::downgrade(this);
        let id = this.source.request_frame(Box::new(move |id| {
            if let Some(inner) = weak.upgrade() {
                Inner::tick(&inner, id);
            }
        }));
        state.pending = Some(id);
    }

    fn stop(&self, state: &mut State) {
        if let Some(id) = state.pending.take() {
            self.source.cancel_frame(id);
            debug!(ticks = state.ticks, "Frame loop stopped");
        }
    }

    fn tick(this: &Arc<Self>, id: FrameRequestId) {
        let (snapshot, tick) = {
            let mut state = this.state();
            if state.pending != Some(id) {
                // cancelled after the source had already dequeued it
                return;
            }
            state.pending = None;
            state.in_tick = true;
            state.ticks += 1;
            (state.callbacks.clone(), state.ticks)
        };

        for entry in &snapshot {
            // removed (or removed and re-added) by an earlier callback in this
            // same frame
            if !this.state().is_registered(entry) {
                continue;
            }
            match panic::catch_unwind(AssertUnwindSafe(|| entry.callback.invoke())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(tick, error = %e, "Frame callback failed"),
                Err(payload) => error!(
                    tick,
                    panic = panic_message(payload.as_ref()),
                    "Frame callback panicked"
                ),
            }
        }

        let mut state = this.state();
        state.in_tick = false;
        if state.callbacks.is_empty() {
            debug!(ticks = state.ticks, "Frame loop went idle");
        } else if state.pending.is_none() {
            Self::request_next(this, &mut state);
        }
    }
}

impl<S: FrameSource> Registry for Inner<S> {
    fn remove(&self, callback: &FrameCallback) {
        let mut state = self.state();
        state.callbacks.retain(|e| e.callback != *callback);
        if state.callbacks.is_empty() {
            self.stop(&mut state);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
