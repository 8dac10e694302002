//! Configuration loader with layered sources.

use crate::{CacheTopology, SdkConfig};
use config::{Config, ConfigError, Environment, File};
use omni_core::{load_env, OmniError};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<SdkConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `OMNI__` prefix (e.g. `OMNI__CACHE__ADDR`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, OmniError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, OmniError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> SdkConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), OmniError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<SdkConfig, OmniError> {
        load_env().map_err(|e| OmniError::Environment(e.exception))?;

        let environment = std::env::var("OMNI_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("OMNI")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cache.addrs")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_omni_error)?;
        let sdk_config: SdkConfig = config.try_deserialize().map_err(config_error_to_omni_error)?;

        Self::validate_config(&sdk_config)?;

        Ok(sdk_config)
    }

    /// Validates the configuration.
    pub fn validate_config(config: &SdkConfig) -> Result<(), OmniError> {
        let cache = &config.cache;

        match cache.topology {
            CacheTopology::Single if cache.addr.is_empty() => {
                return Err(OmniError::configuration("Cache address is required for single topology"));
            }
            CacheTopology::Cluster if cache.addrs.is_empty() => {
                return Err(OmniError::configuration("Cache addresses are required for cluster topology"));
            }
            _ => {}
        }

        if cache.pool_size == 0 {
            return Err(OmniError::configuration("Cache pool size must be positive"));
        }

        if cache.min_idle > cache.pool_size {
            return Err(OmniError::configuration(format!(
                "Cache min idle ({}) exceeds pool size ({})",
                cache.min_idle, cache.pool_size
            )));
        }

        if cache.topology == CacheTopology::Cluster && cache.index != 0 {
            warn!("Cache index {} is ignored for cluster topology", cache.index);
        }

        let pg = &config.postgres;
        if pg.min_connections > pg.max_connections {
            return Err(OmniError::configuration(format!(
                "Postgres min connections ({}) exceeds max connections ({})",
                pg.min_connections, pg.max_connections
            )));
        }

        let mongo = &config.mongo;
        if mongo.min_pool_size > mongo.max_pool_size {
            return Err(OmniError::configuration(format!(
                "Mongo min pool size ({}) exceeds max pool size ({})",
                mongo.min_pool_size, mongo.max_pool_size
            )));
        }

        if config.app.is_production() && !config.logging.production {
            warn!("Production environment is running with development logging");
        }

        Ok(())
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

#[allow(clippy::needless_pass_by_value)]
fn config_error_to_omni_error(err: ConfigError) -> OmniError {
    OmniError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheConfig;
    use std::fs;

    #[tokio::test]
    async fn test_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[app]
name = "otp-service"
environment = "development"

[cache]
addr = "cache.internal:6379"
index = 3
pool_size = 16
min_idle = 4
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("local.toml"),
            r#"
[cache]
addr = "127.0.0.1:6379"
pool_size = 16
min_idle = 4
"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.app.name, "otp-service");
        assert_eq!(config.cache.addr, "127.0.0.1:6379");
        assert_eq!(config.cache.index, 3);
        assert_eq!(config.cache.pool_size, 16);
        assert_eq!(config.postgres.port, 5432);
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[mongo]\nhost = \"docs.internal\"\nport = 27018\nmax_pool_size = 8\nmin_pool_size = 1\ntimeout_secs = 5\nmax_idle_time_secs = 60\nschema = \"catalog\"\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        assert_eq!(loader.get_value::<u16>("mongo.port").await, Some(27018));
        assert_eq!(loader.get_value::<String>("mongo.schema").await.as_deref(), Some("catalog"));
        assert_eq!(loader.get_value::<String>("mongo.missing").await, None);
    }

    #[test]
    fn test_validate_rejects_empty_cluster() {
        let config = SdkConfig {
            cache: CacheConfig::cluster(Vec::<String>::new()),
            ..SdkConfig::default()
        };
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_idle_above_pool() {
        let mut config = SdkConfig::default();
        config.cache.pool_size = 2;
        config.cache.min_idle = 5;
        let err = ConfigLoader::validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("min idle"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ConfigLoader::validate_config(&SdkConfig::default()).is_ok());
    }
}
