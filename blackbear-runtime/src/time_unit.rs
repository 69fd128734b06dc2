use serde::Deserialize;
use std::time::Duration;

use crate::error::Error;
use tracing::warn;

/// Unit attached to a bare number in a duration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
}

impl std::str::FromStr for TimeUnit {
    type Err = Error;

    /// Only full lowercase names are accepted here; shorthand such as `"16ms"`
    /// goes through [`TimeUnit::parse_duration`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "milliseconds" => Ok(TimeUnit::Milliseconds),
            "seconds" => Ok(TimeUnit::Seconds),
            "minutes" => Ok(TimeUnit::Minutes),
            _ => Err(Error::InvalidDuration(format!("unknown time unit '{}'", s))),
        }
    }
}

impl TimeUnit {
    pub fn to_duration(&self, value: u64) -> Duration {
        match self {
            TimeUnit::Milliseconds => Duration::from_millis(value),
            TimeUnit::Seconds => Duration::from_secs(value),
            TimeUnit::Minutes => Duration::from_secs(value.saturating_mul(60)),
        }
    }

    /// Parse a duration string like `"16ms"`, `"2s"` or `"1m"`.
    ///
    /// Suffixes are lowercase only. A bare number is read as milliseconds,
    /// which is how frame intervals and debounce waits are usually written.
    pub fn parse_duration(s: &str) -> Result<Duration, Error> {
        let s = s.trim();
        let split_pos = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());

        if split_pos == 0 {
            return Err(Error::InvalidDuration(s.to_string()));
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str
            .parse::<u64>()
            .map_err(|_| Error::InvalidDuration(s.to_string()))?;

        let unit = match unit_str {
            "" | "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            _ => return Err(Error::InvalidDuration(s.to_string())),
        };

        Ok(unit.to_duration(value))
    }
}

/// Duration as written in a settings file: a number of milliseconds or a
/// shorthand string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDuration {
    Millis(i64),
    Text(String),
}

impl RawDuration {
    /// Resolve to a concrete duration. Negative values clamp to zero and
    /// malformed strings fall back to `default` with a warning.
    pub(crate) fn resolve(&self, setting: &str, default: Duration) -> Duration {
        match self {
            RawDuration::Millis(ms) => Duration::from_millis((*ms).max(0) as u64),
            RawDuration::Text(text) => {
                let text = text.trim();
                if let Some(magnitude) = text.strip_prefix('-') {
                    if TimeUnit::parse_duration(magnitude).is_ok() {
                        return Duration::ZERO;
                    }
                }
                TimeUnit::parse_duration(text).unwrap_or_else(|e| {
                    warn!(setting, error = %e, ?default, "Invalid duration, using default");
                    default
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_suffixes() {
        assert_eq!(TimeUnit::parse_duration("16ms").unwrap(), Duration::from_millis(16));
        assert_eq!(TimeUnit::parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(TimeUnit::parse_duration("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(TimeUnit::parse_duration(" 250 ").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_uppercase_and_garbage() {
        assert!(TimeUnit::parse_duration("5S").is_err());
        assert!(TimeUnit::parse_duration("ms").is_err());
        assert!(TimeUnit::parse_duration("").is_err());
        assert!(TimeUnit::parse_duration("10 ms").is_err());
    }

    #[test]
    fn raw_durations_clamp_and_fall_back() {
        let default = Duration::from_millis(250);
        assert_eq!(RawDuration::Millis(-40).resolve("wait", default), Duration::ZERO);
        assert_eq!(RawDuration::Millis(40).resolve("wait", default), Duration::from_millis(40));
        assert_eq!(RawDuration::Text("-3s".into()).resolve("wait", default), Duration::ZERO);
        assert_eq!(RawDuration::Text("soon".into()).resolve("wait", default), default);
        assert_eq!(RawDuration::Text("1s".into()).resolve("wait", default), Duration::from_secs(1));
    }

    #[test]
    fn full_unit_names() {
        assert_eq!("Seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }
}
