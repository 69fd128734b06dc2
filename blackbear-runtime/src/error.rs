use thiserror::Error;

/// Errors surfaced by the Blackbear runtime.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0} requires a running tokio runtime")]
    NoRuntime(&'static str),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by fallible frame callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
