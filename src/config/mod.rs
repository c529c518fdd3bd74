//! Configuration management for kodion
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use kodion::config::{Config, Settings};
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Request timeout: {:?}", config.timeout());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `KODION__<section>__<key>`
//!
//! Examples:
//! - `KODION__NETWORK__VERIFY_TLS=false`
//! - `KODION__NETWORK__TIMEOUT=30s`
//! - `KODION__UI__SHOW_FANART=false`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/kodion.toml`.
//! This can be overridden using the `KODION_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{
    AddonConfig, Config, NetworkConfig, PoolConfig, RetryConfig, StorageConfig, UiConfig,
};
pub use sources::ConfigSources;
pub use validation::{ValidationError, validate_network};

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Read-only settings consumed by the request client and the runner
pub trait Settings: Send + Sync {
    fn verify_tls(&self) -> bool;

    /// Default per-request timeout
    fn timeout(&self) -> Duration;

    fn show_fanart(&self) -> bool;

    fn is_override_view_enabled(&self) -> bool;
}

impl Settings for Config {
    fn verify_tls(&self) -> bool {
        self.network.verify_tls
    }

    fn timeout(&self) -> Duration {
        self.network.timeout.as_duration()
    }

    fn show_fanart(&self) -> bool {
        self.ui.show_fanart
    }

    fn is_override_view_enabled(&self) -> bool {
        self.ui.override_view
    }
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`KODION__*`)
    /// 2. TOML file (default: `config/kodion.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (empty pool, bad retry statuses, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        Self::from_sources(ConfigSources::new(path))
    }

    /// Build and validate from explicit sources
    pub fn from_sources(sources: ConfigSources) -> Result<Self, ConfigError> {
        let config = sources.build()?;
        validation::validate(&config)?;
        Ok(config)
    }
}
