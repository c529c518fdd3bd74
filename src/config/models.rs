use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub addon: AddonConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Addon identity, used to namespace host properties and notifications
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,
    #[serde(default = "default_addon_name")]
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            name: default_addon_name(),
            icon: String::new(),
        }
    }
}

fn default_addon_id() -> String {
    "plugin.video.youtube".to_string()
}

fn default_addon_name() -> String {
    "YouTube".to_string()
}

/// HTTP session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[serde(default = "default_timeout")]
    pub timeout: HumanDuration,
    /// URL prefixes served by the pooled, retrying adapter
    #[serde(default = "default_mounts")]
    pub mounts: Vec<String>,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            verify_tls: default_verify_tls(),
            timeout: default_timeout(),
            mounts: default_mounts(),
            pool: PoolConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from_secs(9)
}

fn default_mounts() -> Vec<String> {
    vec!["https://".to_string()]
}

/// Connection pool bounds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Wait for a free connection instead of opening an extra one
    #[serde(default = "default_blocking_when_exhausted")]
    pub blocking_when_exhausted: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            blocking_when_exhausted: default_blocking_when_exhausted(),
        }
    }
}

fn default_max_connections() -> usize {
    10
}

fn default_blocking_when_exhausted() -> bool {
    true
}

/// Retry policy applied by the pooled adapter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Seconds; delay before retry n is `backoff_factor * 2^(n-1)`
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
    #[serde(default = "default_retry_on_status")]
    pub retry_on_status: Vec<u16>,
    /// Methods allowed to retry on a status; `None` retries no method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_methods: Option<Vec<String>>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_factor: default_backoff_factor(),
            retry_on_status: default_retry_on_status(),
            retry_methods: None,
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_factor() -> f64 {
    0.1
}

fn default_retry_on_status() -> Vec<u16> {
    vec![500, 502, 503, 504]
}

/// Listing presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_show_fanart")]
    pub show_fanart: bool,
    #[serde(default)]
    pub override_view: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<i32>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_fanart: default_show_fanart(),
            override_view: false,
            view_mode: None,
        }
    }
}

fn default_show_fanart() -> bool {
    true
}

/// Local record store locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            favorites_path: default_favorites_path(),
        }
    }
}

fn default_favorites_path() -> PathBuf {
    PathBuf::from("data/favorites")
}
