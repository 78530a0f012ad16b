//! Dashboard configuration
//!
//! Values come from built-in defaults, optionally overridden by a TOML file and
//! then by command-line flags / environment variables in the binary.

use crate::error::{FlowwatchError, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Feed location used when nothing is configured (the bundled mock feed)
pub const DEFAULT_FEED_URL: &str = "data/errors.json";

/// Periodic refresh interval: 5 minutes
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5 * 60 * 1000;

/// Maximum number of cards shown at once
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Severity assumed for records that carry none
pub const DEFAULT_SEVERITY: &str = "critical";

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Main dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Feed location: `http(s)://` URL or a local file path
    pub feed_url: String,

    /// Interval between periodic refreshes (milliseconds)
    pub refresh_interval_ms: u64,

    /// Maximum cards displayed after filtering (0 = unlimited)
    pub display_limit: usize,

    /// Severity used when a record has none
    pub default_severity: String,

    /// Per-request timeout for HTTP feeds (milliseconds)
    pub request_timeout_ms: u64,

    /// Fixed display zone as minutes east of UTC; local zone when unset
    pub utc_offset_minutes: Option<i32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            default_severity: DEFAULT_SEVERITY.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            utc_offset_minutes: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.feed_url.trim().is_empty() {
            return Err(FlowwatchError::InvalidConfig(
                "feed_url must not be empty".to_string(),
            ));
        }

        if self.refresh_interval_ms == 0 {
            return Err(FlowwatchError::InvalidConfig(
                "refresh_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(FlowwatchError::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.default_severity.trim().is_empty() {
            return Err(FlowwatchError::InvalidConfig(
                "default_severity must not be empty".to_string(),
            ));
        }

        if let Some(minutes) = self.utc_offset_minutes {
            if !(-(MAX_OFFSET_MINUTES - 1)..=MAX_OFFSET_MINUTES - 1).contains(&minutes) {
                return Err(FlowwatchError::InvalidConfig(format!(
                    "utc_offset_minutes must be within ±{} (got {})",
                    MAX_OFFSET_MINUTES - 1,
                    minutes
                )));
            }
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Fixed display offset, if one is configured and in range
    pub fn display_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
    }

    /// Whether the feed is fetched over HTTP rather than read from disk
    pub fn is_remote_feed(&self) -> bool {
        let url = self.feed_url.trim_start();
        url.starts_with("http://") || url.starts_with("https://")
    }
}
