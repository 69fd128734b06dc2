//! # Blackbear - Page Runtime for the Blackbear Theme
//!
//! The pieces of the theme that run while a page is open, plus the helpers
//! that decide what a page renders.
//!
//! ## Features
//!
//! - **Frame-batched callbacks**: register per-frame work; the loop starts with
//!   the first callback and stops with the last
//! - **Throttle**: leading-edge, drops calls during the cooldown
//! - **Debounce**: trailing-edge, or leading-edge with `immediate`
//! - **Batch jobs**: spread bulk work over frames
//! - **Page state**: comment widget selection, TOC visibility, social links,
//!   titles, excerpts and pagination
//! - **Config support**: TOML or YAML settings with `BLACKBEAR_*` overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use blackbear::{FrameCallback, FrameScheduler};
//!
//! let (scheduler, frames) = FrameScheduler::manual();
//! let handle = scheduler.add(FrameCallback::new(|| {
//!     // update the highlighted TOC entry
//! }));
//!
//! frames.fire(); // one display refresh
//! handle.remove();
//! assert!(!scheduler.is_running());
//! ```
//!
//! With a tokio runtime the frames can come from a timer instead:
//!
//! ```rust,no_run
//! use blackbear::{FrameCallback, FrameScheduler, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_yaml("config/blackbear.yaml")?;
//!     let scheduler = FrameScheduler::new(settings.runtime.interval_frames()?);
//!     let _handle = scheduler.add(FrameCallback::new(|| println!("frame")));
//!
//!     tokio::signal::ctrl_c().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! `config/blackbear.yaml`:
//!
//! ```yaml
//! runtime:
//!   frame_interval: 16ms
//!   scroll_throttle: 16ms
//!   resize_debounce: 250ms
//!   batch_size: 100
//! site:
//!   title: Bear Notes
//!   root: /
//!   feed:
//!     path: atom.xml
//! theme:
//!   toc: true
//!   rss: default
//!   disqus_shortname: bear-notes
//!   social:
//!     github: grizzly
//! ```
//!
//! Environment variables override file values, e.g.
//! `BLACKBEAR_RUNTIME__FRAME_INTERVAL=33ms`.

// Re-export core types
pub use blackbear_runtime::{
    debounce, preload_hints, throttle, BatchJob, BoxError, Debounced, Error, FrameCallback,
    FrameScheduler, FrameSource, IntervalFrames, ManualFrames, PreloadHint, PreloadKind,
    RemoveHandle, Result, RunState, RuntimeSettings, Settings, StateManagers, Throttled,
};

// Page state helpers live under their own path
pub use blackbear_runtime::state;

// Make blackbear_runtime available for advanced use
pub use blackbear_runtime;
