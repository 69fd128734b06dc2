use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::Result;
use crate::frame::IntervalFrames;
use crate::rate::{debounce, throttle, Debounced, Throttled};
use crate::state::{SiteConfig, ThemeConfig};
use crate::time_unit::RawDuration;

/// One frame at roughly 60fps.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(16);
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
pub const DEFAULT_BATCH_SIZE: usize = 100;

fn environment() -> config::Environment {
    config::Environment::with_prefix("BLACKBEAR")
        .prefix_separator("_")
        .separator("__")
}

/// Load config from a specific TOML file, layered with `BLACKBEAR_*` env vars
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(environment())
        .build()?;
    Ok(config)
}

/// Load config from a specific YAML file, layered with `BLACKBEAR_*` env vars
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(environment())
        .build()?;
    Ok(config)
}

/// Everything a page render needs: runtime tuning, site and theme config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub runtime: RuntimeSettings,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Settings {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(load_toml_config(path)?)
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(load_yaml_config(path)?)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let settings: Settings = config.try_deserialize()?;
        info!(
            frame_interval_ms = settings.runtime.frame_interval.as_millis() as u64,
            batch_size = settings.runtime.batch_size,
            site = %settings.site.title,
            "Loaded settings"
        );
        Ok(settings)
    }
}

/// Timing knobs for the frame loop and the scroll/resize wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRuntimeSettings")]
pub struct RuntimeSettings {
    pub frame_interval: Duration,
    pub scroll_throttle: Duration,
    pub resize_debounce: Duration,
    pub batch_size: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            scroll_throttle: DEFAULT_SCROLL_THROTTLE,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Deserialize)]
struct RawRuntimeSettings {
    frame_interval: Option<RawDuration>,
    scroll_throttle: Option<RawDuration>,
    resize_debounce: Option<RawDuration>,
    batch_size: Option<usize>,
}

impl From<RawRuntimeSettings> for RuntimeSettings {
    fn from(raw: RawRuntimeSettings) -> Self {
        let resolve = |value: Option<RawDuration>, setting: &str, default: Duration| {
            value.map_or(default, |v| v.resolve(setting, default))
        };

        Self {
            frame_interval: resolve(raw.frame_interval, "frame_interval", DEFAULT_FRAME_INTERVAL),
            scroll_throttle: resolve(raw.scroll_throttle, "scroll_throttle", DEFAULT_SCROLL_THROTTLE),
            resize_debounce: resolve(raw.resize_debounce, "resize_debounce", DEFAULT_RESIZE_DEBOUNCE),
            batch_size: raw.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

impl RuntimeSettings {
    /// Wrap a scroll handler so it runs at most once per `scroll_throttle`.
    pub fn throttle_scroll<F>(&self, handler: F) -> Throttled<F> {
        throttle(handler, self.scroll_throttle)
    }

    /// Wrap a resize handler so it only runs once resizing has settled.
    pub fn debounce_resize<A, F>(&self, handler: F) -> Result<Debounced<A>>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        debounce(handler, self.resize_debounce, false)
    }

    /// Tokio-driven frame source ticking every `frame_interval`.
    pub fn interval_frames(&self) -> Result<IntervalFrames> {
        IntervalFrames::new(self.frame_interval)
    }
}
