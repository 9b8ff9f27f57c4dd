//! Engine configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AssessError, Result};

/// Configuration for the assessment engine and its scheduler.
///
/// Loadable from a config file or built in code; all fields default to
/// sensible production values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// Provider polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Wait after a detected change before recomputing, to coalesce
    /// rapid successive upstream writes (0 disables)
    pub debounce_ms: u64,
    /// Run the four domain pipelines as parallel tasks joined before
    /// publishing; sequential when false (both are correct)
    pub parallel: bool,
    /// Skip recomputation when the snapshot fingerprint is unchanged
    pub skip_unchanged: bool,
    /// Suppress non-essential sink output
    pub quiet: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            debounce_ms: 0,
            parallel: true,
            skip_unchanged: true,
            quiet: false,
        }
    }
}

impl EngineConfig {
    /// Polling interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours).
///
/// # Examples
///
/// ```
/// use gridscore::config::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid_interval(s));
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with('s') || s.ends_with('m') || s.ends_with('h') {
        (&s[..s.len() - 1], &s[s.len() - 1..])
    } else {
        return Err(invalid_interval(s));
    };

    let value: u64 = num_str.parse().map_err(|_| invalid_interval(s))?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 3600)),
        _ => Err(invalid_interval(s)),
    }
}

fn invalid_interval(s: &str) -> AssessError {
    AssessError::config(format!(
        "invalid interval '{s}': expected format like 500ms, 30s, 5m, 1h"
    ))
}
