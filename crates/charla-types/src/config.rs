//! Client configuration shape.
//!
//! Loaded from `config.toml` in the data directory by charla-infra.
//! Every field has a default so a missing or partial file still yields a
//! working configuration.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the bridge service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound for one health probe, in seconds.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Bound for one model catalog fetch, in seconds.
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,

    /// Interval between periodic health probes, in seconds.
    #[serde(default = "default_health_poll_interval_secs")]
    pub health_poll_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout_secs(),
            catalog_timeout_secs: default_catalog_timeout_secs(),
            health_poll_interval_secs: default_health_poll_interval_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

fn default_health_poll_interval_secs() -> u64 {
    30
}
