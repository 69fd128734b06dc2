use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Leading-edge throttle.
///
/// The first call in a quiet period runs the wrapped function immediately and
/// opens a cooldown window; calls inside the window are dropped, not queued.
pub struct Throttled<F> {
    func: F,
    interval: Duration,
    cooldown_until: Mutex<Option<Instant>>,
}

/// Wrap `func` so it runs at most once per `interval`.
pub fn throttle<F>(func: F, interval: Duration) -> Throttled<F> {
    Throttled {
        func,
        interval,
        cooldown_until: Mutex::new(None),
    }
}

impl<F> Throttled<F> {
    /// Invoke the wrapped function unless a cooldown is active.
    ///
    /// Returns `true` when the function ran. Panics from the function reach
    /// the caller unchanged.
    pub fn call<A>(&self, args: A) -> bool
    where
        F: Fn(A),
    {
        if !self.try_enter() {
            return false;
        }
        (self.func)(args);
        true
    }

    /// Whether a call made now would be dropped.
    pub fn is_cooling_down(&self) -> bool {
        let until = *self.cooldown_until.lock().unwrap_or_else(PoisonError::into_inner);
        until.is_some_and(|until| Instant::now() < until)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // Arms the cooldown before the function runs so re-entrant calls drop.
    fn try_enter(&self) -> bool {
        if self.interval.is_zero() {
            return true;
        }

        let now = Instant::now();
        let mut until = self.cooldown_until.lock().unwrap_or_else(PoisonError::into_inner);
        match *until {
            Some(deadline) if now < deadline => false,
            _ => {
                *until = Some(now + self.interval);
                true
            }
        }
    }
}

impl<F> std::fmt::Debug for Throttled<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("interval", &self.interval)
            .field("cooling_down", &self.is_cooling_down())
            .finish()
    }
}
