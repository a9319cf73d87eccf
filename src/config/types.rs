use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for sitezip
///
/// Every section and every field has a default, so a partial config file (or
/// no config file at all) yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of concurrent resource fetches
    #[serde(rename = "pool-size", default = "default_pool_size")]
    pub pool_size: usize,

    /// Per-attempt request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Retry behavior configuration for resource fetches
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Maximum fetch attempts per resource
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Multiplier applied to the delay after each failed attempt
    #[serde(rename = "backoff-factor", default = "default_backoff_factor")]
    pub backoff_factor: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the zip archive to write
    #[serde(rename = "archive-path", default = "default_archive_path")]
    pub archive_path: String,
}

fn default_pool_size() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("sitezip/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_backoff_factor() -> u32 {
    2
}

fn default_archive_path() -> String {
    "website.zip".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
        }
    }
}

impl FetchConfig {
    /// Returns the per-attempt request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl RetryConfig {
    /// Returns the delay before the first retry as a `Duration`
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}
