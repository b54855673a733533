//! Insight generation and caching configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cached insights are served for 15 minutes.
const fn default_ttl_secs() -> u64 {
    15 * 60
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

fn default_summary_model() -> String {
    "gemini-pro".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InsightsConfig {
    /// Freshness window of a cached insight, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Generative Language API key. Empty disables generation.
    #[serde(default)]
    pub api_key: String,

    /// Model used for per-task insights.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used for the daily summary.
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// API base URL, without trailing slash.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            api_key: String::new(),
            model: default_model(),
            summary_model: default_summary_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InsightsConfig {
    /// Check if a generator can be built from this config.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Cache freshness window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `ttl_secs` is zero, which would
    /// make every cached insight stale on arrival.
    pub fn ttl(&self) -> Result<Duration, ConfigError> {
        if self.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "insights.ttl_secs",
                reason: "must be greater than zero",
            });
        }
        Ok(Duration::from_secs(self.ttl_secs))
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Require an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `api_key` is empty.
    pub fn require_configured(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::Missing {
                key: "insights.api_key",
                env_var: "ROLEJUGGLER_INSIGHTS__API_KEY",
            })
        }
    }
}
