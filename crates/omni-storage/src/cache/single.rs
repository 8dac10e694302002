//! Single-endpoint cache backend.

use super::client::{self, CacheClient, CacheClientError};
use super::node_url;
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use omni_config::{CacheConfig, CacheTopology};
use omni_core::{OmniError, OmniResult};
use std::time::Duration;
use tracing::info;

/// Pooled connections to one cache node.
#[derive(Clone)]
pub struct SingleNodeClient {
    pool: Pool,
}

impl SingleNodeClient {
    /// Creates the pool for `config.addr` and opens `config.min_idle`
    /// connections up front.
    pub async fn connect(config: &CacheConfig) -> OmniResult<Self> {
        info!(addr = %config.addr, index = config.index, "Creating cache connection pool...");
        client::check_pool_bounds(config)?;

        let url = node_url(&config.addr, config.password.as_deref(), Some(config.index))?;

        let pool = Config::from_url(url.as_str())
            .builder()
            .map_err(|e| OmniError::configuration(format!("Invalid cache config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| OmniError::configuration(format!("Failed to create cache pool: {}", e)))?;

        let cache = Self::from_pool(pool);
        client::warm_up(config.min_idle, || cache.pool.get()).await?;

        info!(addr = %config.addr, "Cache connection pool created successfully");
        Ok(cache)
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    async fn conn(&self) -> Result<Connection, CacheClientError> {
        self.pool.get().await.map_err(|e| CacheClientError::Pool(e.to_string()))
    }
}

impl std::fmt::Debug for SingleNodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("SingleNodeClient")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

#[async_trait]
impl CacheClient for SingleNodeClient {
    fn topology(&self) -> CacheTopology {
        CacheTopology::Single
    }

    async fn del(&self, key: &str) -> Result<(), CacheClientError> {
        client::del(&mut self.conn().await?, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheClientError> {
        client::set(&mut self.conn().await?, key, value).await
    }

    async fn set_nx_px(&self, key: &str, value: &str, expiry: Duration) -> Result<bool, CacheClientError> {
        client::set_nx_px(&mut self.conn().await?, key, value, expiry).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheClientError> {
        client::get(&mut self.conn().await?, key).await
    }

    async fn pttl(&self, key: &str) -> Result<i64, CacheClientError> {
        client::pttl(&mut self.conn().await?, key).await
    }
}
