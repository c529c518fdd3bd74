use super::models::Config;
use config::{ConfigError, Environment, File, Map};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "KODION_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/kodion.toml";
const ENV_PREFIX: &str = "KODION";
const ENV_SEPARATOR: &str = "__";

/// Keys whose environment value is a comma separated list
const LIST_KEYS: [&str; 2] = ["network.mounts", "network.retry.retry_methods"];

/// Where a [`Config`] is assembled from
///
/// Later layers win: struct defaults, then the TOML file, then the
/// environment. `env` replaces the process environment when set.
#[derive(Debug, Default)]
pub struct ConfigSources {
    path: PathBuf,
    env: Option<Map<String, String>>,
}

impl ConfigSources {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env: None,
        }
    }

    /// Read `KODION_*` overrides from `vars` instead of the process environment
    pub fn with_env(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let mut builder = config::Config::builder();

        if self.path.exists() {
            tracing::info!("Loading configuration from: {}", self.path.display());
            builder = builder.add_source(File::from(self.path).required(false));
        } else {
            tracing::debug!(
                "No configuration file at {}, using defaults",
                self.path.display()
            );
        }

        // KODION__NETWORK__VERIFY_TLS -> network.verify_tls
        let mut environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(",")
            .try_parsing(true)
            .source(self.env);
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        builder.add_source(environment).build()?.try_deserialize()
    }
}

/// Load from `KODION_CONFIG` (or `config/kodion.toml`) plus the environment
///
/// A `.env` file in the working directory is read first when present.
pub fn load() -> Result<Config, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    ConfigSources::new(config_path).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();

        let config = ConfigSources::new(temp_dir.path().join("nonexistent.toml"))
            .with_env(Map::new())
            .build()
            .unwrap();

        assert_eq!(config.addon.id, "plugin.video.youtube");
        assert_eq!(config.network.pool.max_connections, 10);
        assert_eq!(config.network.retry.max_attempts, 3);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(
            &config_path,
            r#"
[addon]
id = "plugin.video.example"

[network]
verify_tls = false
timeout = "30s"

[network.pool]
max_connections = 4
blocking_when_exhausted = false

[network.retry]
retry_on_status = [429, 503]
retry_methods = ["GET"]

[ui]
view_mode = 55

[storage]
favorites_path = "/tmp/kodion/favorites"
"#,
        )
        .unwrap();

        let config = ConfigSources::new(config_path)
            .with_env(Map::new())
            .build()
            .unwrap();

        assert_eq!(config.addon.id, "plugin.video.example");
        assert!(!config.network.verify_tls);
        assert_eq!(config.network.timeout.as_duration(), Duration::from_secs(30));
        assert_eq!(config.network.pool.max_connections, 4);
        assert!(!config.network.pool.blocking_when_exhausted);
        assert_eq!(config.network.retry.retry_on_status, vec![429, 503]);
        assert_eq!(
            config.network.retry.retry_methods,
            Some(vec!["GET".to_string()])
        );
        assert_eq!(config.ui.view_mode, Some(55));
        assert_eq!(
            config.storage.favorites_path,
            PathBuf::from("/tmp/kodion/favorites")
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(&config_path, "[ui]\nshow_fanart = true\n").unwrap();

        let config = ConfigSources::new(config_path)
            .with_env(vars(&[
                ("KODION__UI__SHOW_FANART", "false"),
                ("KODION__NETWORK__POOL__MAX_CONNECTIONS", "2"),
                ("KODION__NETWORK__MOUNTS", "https://,http://"),
                ("UNRELATED", "ignored"),
            ]))
            .build()
            .unwrap();

        assert!(!config.ui.show_fanart);
        assert_eq!(config.network.pool.max_connections, 2);
        assert_eq!(config.network.mounts, vec!["https://", "http://"]);
    }
}
