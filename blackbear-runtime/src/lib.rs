//! Blackbear Runtime - frame-batched callbacks, rate limiting and page state
//!
//! This crate provides the runtime pieces behind the Blackbear theme's page
//! enhancements: a scheduler that coalesces visual updates into one pass per
//! frame, throttle/debounce wrappers for scroll and resize handlers, and the
//! helpers that decide what a rendered page shows.

mod config;
mod error;
pub mod frame;
mod preload;
pub mod rate;
pub mod state;
mod time_unit;

// Re-export public API
pub use crate::config::{
    load_toml_config, load_yaml_config, RuntimeSettings, Settings, DEFAULT_BATCH_SIZE,
    DEFAULT_FRAME_INTERVAL, DEFAULT_RESIZE_DEBOUNCE, DEFAULT_SCROLL_THROTTLE,
};
pub use error::{BoxError, Error, Result};
pub use frame::{
    BatchJob, CallbackResult, FrameCallback, FrameRequestId, FrameScheduler, FrameSource,
    FrameTask, IntervalFrames, IntoCallbackResult, ManualFrames, RemoveHandle, RunState,
};
pub use preload::{preload_hints, PreloadHint, PreloadKind};
pub use rate::{debounce, throttle, Debounced, Throttled};
pub use state::StateManagers;
pub use time_unit::TimeUnit;
