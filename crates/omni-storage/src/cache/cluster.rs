//! Clustered cache backend.

use super::client::{self, CacheClient, CacheClientError};
use super::node_url;
use async_trait::async_trait;
use deadpool_redis::cluster::{Config, Connection, Pool};
use deadpool_redis::{PoolConfig, Runtime};
use omni_config::{CacheConfig, CacheTopology};
use omni_core::{OmniError, OmniResult};
use std::time::Duration;
use tracing::{info, warn};

/// Pool configuration over the `config.addrs` seeds.
fn cluster_config(config: &CacheConfig) -> OmniResult<Config> {
    client::check_pool_bounds(config)?;

    if config.index != 0 {
        warn!(index = config.index, "Logical database index is not supported by clusters; ignoring");
    }

    let urls = config
        .addrs
        .iter()
        .map(|addr| node_url(addr, config.password.as_deref(), None).map(String::from))
        .collect::<OmniResult<Vec<_>>>()?;

    let mut cfg = Config::from_urls(urls);
    cfg.pool = Some(PoolConfig::new(config.pool_size));
    Ok(cfg)
}

/// Pooled cluster connections; commands are routed to the owning shard.
#[derive(Clone)]
pub struct ClusterClient {
    pool: Pool,
}

impl ClusterClient {
    /// Creates the pool over the `config.addrs` seeds and opens
    /// `config.min_idle` connections up front.
    pub async fn connect(config: &CacheConfig) -> OmniResult<Self> {
        info!(nodes = config.addrs.len(), "Creating cluster cache connection pool...");

        let pool = cluster_config(config)?
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| OmniError::configuration(format!("Failed to create cluster pool: {}", e)))?;

        let cache = Self::from_pool(pool);
        client::warm_up(config.min_idle, || cache.pool.get()).await?;

        info!("Cluster cache connection pool created successfully");
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

impl std::fmt::Debug for ClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("ClusterClient")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

#[async_trait]
impl CacheClient for ClusterClient {
    fn topology(&self) -> CacheTopology {
        CacheTopology::Cluster
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
