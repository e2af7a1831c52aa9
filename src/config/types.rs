use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

/// Connection settings for the library server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the library server, without the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Scan progress polling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Interval between status requests in milliseconds (default: 1000)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Drop status responses that arrive after a newer one was applied
    #[serde(default)]
    pub discard_stale_responses: bool,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl ScanConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            discard_stale_responses: false,
        }
    }
}

/// Local file classification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Files larger than this are skipped (default: 10 GiB)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    #[serde(default = "default_true")]
    pub skip_hidden_files: bool,

    /// Descend into subdirectories
    #[serde(default = "default_true")]
    pub recursive: bool,
}

fn default_max_file_size_mb() -> u64 {
    10240
}

fn default_true() -> bool {
    true
}

impl MediaConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            skip_hidden_files: true,
            recursive: true,
        }
    }
}
