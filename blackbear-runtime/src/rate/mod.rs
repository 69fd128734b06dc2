mod debounce;
mod throttle;

pub use debounce::{debounce, Debounced};
pub use throttle::{throttle, Throttled};
