use super::models::{Config, NetworkConfig};
use reqwest::Method;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Addon id must not be empty")]
    EmptyAddonId,

    #[error("Connection pool size must be positive")]
    InvalidPoolSize,

    #[error("Retry max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("Retry backoff_factor must be a finite non-negative number, got {value}")]
    InvalidBackoffFactor { value: f64 },

    #[error("Retry status {status} is not a valid HTTP status code")]
    InvalidRetryStatus { status: u16 },

    #[error("Retry method '{method}' is not a valid HTTP method")]
    InvalidRetryMethod { method: String },

    #[error("Request timeout must be positive")]
    InvalidTimeout,

    #[error("At least one adapter mount prefix is required")]
    NoMounts,

    #[error("Adapter mount prefix '{prefix}' must start with http:// or https://")]
    InvalidMount { prefix: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_addon(config)?;
    validate_network(&config.network)?;
    Ok(())
}

fn validate_addon(config: &Config) -> Result<(), ValidationError> {
    if config.addon.id.trim().is_empty() {
        return Err(ValidationError::EmptyAddonId);
    }

    Ok(())
}

/// Validate pool, retry policy, timeout and mounts
pub fn validate_network(network: &NetworkConfig) -> Result<(), ValidationError> {
    if network.pool.max_connections == 0 {
        return Err(ValidationError::InvalidPoolSize);
    }

    if network.timeout.as_duration().is_zero() {
        return Err(ValidationError::InvalidTimeout);
    }

    if network.mounts.is_empty() {
        return Err(ValidationError::NoMounts);
    }

    for prefix in &network.mounts {
        if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
            return Err(ValidationError::InvalidMount {
                prefix: prefix.clone(),
            });
        }
    }

    let retry = &network.retry;

    if retry.max_attempts == 0 {
        return Err(ValidationError::InvalidMaxAttempts);
    }

    if !retry.backoff_factor.is_finite() || retry.backoff_factor < 0.0 {
        return Err(ValidationError::InvalidBackoffFactor {
            value: retry.backoff_factor,
        });
    }

    for &status in &retry.retry_on_status {
        if !(100..=599).contains(&status) {
            return Err(ValidationError::InvalidRetryStatus { status });
        }
    }

    for method in retry.retry_methods.iter().flatten() {
        if Method::from_bytes(method.to_uppercase().as_bytes()).is_err() {
            return Err(ValidationError::InvalidRetryMethod {
                method: method.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::HumanDuration;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_addon_id() {
        let mut config = Config::default();
        config.addon.id = "  ".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::EmptyAddonId)));
    }

    #[test]
    fn test_zero_pool_size() {
        let mut config = Config::default();
        config.network.pool.max_connections = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidPoolSize)));
    }

    #[test]
    fn test_zero_attempts() {
        let mut config = Config::default();
        config.network.retry.max_attempts = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidMaxAttempts)));
    }

    #[test]
    fn test_negative_backoff() {
        let mut config = Config::default();
        config.network.retry.backoff_factor = -1.0;

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidBackoffFactor { .. })
        ));

        config.network.retry.backoff_factor = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_retry_status() {
        let mut config = Config::default();
        config.network.retry.retry_on_status = vec![503, 999];

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidRetryStatus { status: 999 })
        ));
    }

    #[test]
    fn test_invalid_retry_method() {
        let mut config = Config::default();
        config.network.retry.retry_methods = Some(vec!["GET".to_string(), "BAD METHOD".to_string()]);

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidRetryMethod { .. })
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.network.timeout = HumanDuration::from_secs(0);

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn test_mounts() {
        let mut config = Config::default();
        config.network.mounts.clear();
        assert!(matches!(validate(&config), Err(ValidationError::NoMounts)));

        config.network.mounts = vec!["ftp://".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidMount { .. })
        ));
    }
}
