//! Service bootstrap.

use mongodb::Database;
use omni_config::{ConfigLoader, SdkConfig};
use omni_core::{init_logging, OmniResult};
use omni_storage::{connect_cacher, connect_mongo, Cacher, PostgresPool};
use std::sync::Arc;
use tracing::{info, info_span};

/// Bootstrapped components of a service.
pub struct Omni {
    config: SdkConfig,
    cacher: Option<Arc<dyn Cacher>>,
    mongo: Option<Database>,
    postgres: Option<PostgresPool>,
}

impl Omni {
    /// Effective configuration.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Cache, if requested with [`OmniBuilder::with_cache`].
    pub fn cacher(&self) -> Option<Arc<dyn Cacher>> {
        self.cacher.clone()
    }

    /// Document database, if requested with [`OmniBuilder::with_mongo`].
    pub fn mongo(&self) -> Option<&Database> {
        self.mongo.as_ref()
    }

    /// Relational pool, if requested with [`OmniBuilder::with_postgres`].
    pub fn postgres(&self) -> Option<&PostgresPool> {
        self.postgres.as_ref()
    }
}

/// Builder for [`Omni`].
///
/// Nothing is connected unless asked for. Without an explicit configuration
/// the layered files under `./config` and `OMNI__*` variables are loaded.
#[derive(Default)]
pub struct OmniBuilder {
    config: Option<SdkConfig>,
    config_dir: Option<String>,
    logging: bool,
    cache: bool,
    mongo: bool,
    postgres: bool,
}

impl OmniBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` instead of loading one.
    pub fn with_config(mut self, config: SdkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads configuration from `dir` instead of `./config`.
    pub fn with_config_dir(mut self, dir: impl Into<String>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Installs the global log subscriber.
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    pub fn with_cache(mut self) -> Self {
        self.cache = true;
        self
    }

    pub fn with_mongo(mut self) -> Self {
        self.mongo = true;
        self
    }

    pub fn with_postgres(mut self) -> Self {
        self.postgres = true;
        self
    }

    /// Resolves configuration and opens the requested connections.
    pub async fn build(self) -> OmniResult<Omni> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let loader = match self.config_dir {
                    Some(dir) => ConfigLoader::new(dir)?,
                    None => ConfigLoader::from_default_location()?,
                };
                loader.get().await
            }
        };

        if self.logging {
            init_logging(&config.logging)?;
        }

        info!(app = %config.app.name, environment = %config.app.environment, "Bootstrapping service");

        let cacher = if self.cache {
            let span = info_span!("cache", app = %config.app.name);
            Some(connect_cacher(&config.cache, span).await?)
        } else {
            None
        };

        let mongo = if self.mongo {
            Some(connect_mongo(&config.mongo).await?)
        } else {
            None
        };

        let postgres = if self.postgres {
            Some(PostgresPool::new(&config.postgres).await?)
        } else {
            None
        };

        Ok(Omni {
            config,
            cacher,
            mongo,
            postgres,
        })
    }
}
