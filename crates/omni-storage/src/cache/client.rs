//! Minimal command surface a cache backend has to provide.

use async_trait::async_trait;
use deadpool_redis::redis::{self, aio::ConnectionLike, AsyncCommands, RedisError};
use omni_config::{CacheConfig, CacheTopology};
use omni_core::{OmniError, OmniResult};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Failure reported by a [`CacheClient`].
#[derive(Error, Debug)]
pub enum CacheClientError {
    /// No connection could be checked out of the pool.
    #[error("connection pool: {0}")]
    Pool(String),

    /// The server rejected the command or the connection broke mid-command.
    #[error(transparent)]
    Command(#[from] RedisError),

    /// The key does not exist.
    #[error("redis: nil")]
    Nil,

    /// A conditional write found the key already present.
    #[error("key '{0}' already exists")]
    AlreadyExists(String),
}

/// Commands the cache policy in [`super::RedisCache`] is built from.
///
/// Keys passed here are already composite.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Deployment topology, used to label log messages.
    fn topology(&self) -> CacheTopology;

    /// `DEL key`.
    async fn del(&self, key: &str) -> Result<(), CacheClientError>;

    /// `SET key value` without expiry.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheClientError>;

    /// `SET key value NX PX expiry`. Returns whether the write was applied.
    async fn set_nx_px(&self, key: &str, value: &str, expiry: Duration) -> Result<bool, CacheClientError>;

    /// `GET key`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheClientError>;

    /// `PTTL key` in milliseconds, including the `-1`/`-2` sentinels.
    async fn pttl(&self, key: &str) -> Result<i64, CacheClientError>;
}

/// Rejects pool sizes a connect could wait on forever: an empty pool, or
/// more idle connections than the pool can hold.
pub(super) fn check_pool_bounds(config: &CacheConfig) -> OmniResult<()> {
    if config.pool_size == 0 {
        return Err(OmniError::configuration("Cache pool size must be greater than 0"));
    }
    if config.min_idle > config.pool_size {
        return Err(OmniError::configuration(format!(
            "Cache min idle ({}) exceeds pool size ({})",
            config.min_idle, config.pool_size
        )));
    }
    Ok(())
}

/// Checks out `idle` connections at once so they stay open in the pool, then
/// pings the first one. At least one connection is always opened.
pub(super) async fn warm_up<C, E, F, Fut>(idle: usize, mut checkout: F) -> OmniResult<()>
where
    C: ConnectionLike + Send,
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<C, E>>,
{
    let mut held = Vec::with_capacity(idle.max(1));
    for _ in 0..idle.max(1) {
        held.push(checkout().await.map_err(|e| {
            warn!("Failed to open cache connection: {}", e);
            OmniError::Cache(format!("Failed to connect: {}", e))
        })?);
    }

    if let Some(first) = held.first_mut() {
        redis::cmd("PING")
            .query_async::<String>(first)
            .await
            .map_err(|e| OmniError::Cache(format!("Ping failed: {}", e)))?;
    }

    Ok(())
}

// Command bodies shared by the single-node and cluster connections.

pub(super) async fn del<C: ConnectionLike + Send>(conn: &mut C, key: &str) -> Result<(), CacheClientError> {
    conn.del::<_, ()>(key).await?;
    Ok(())
}

pub(super) async fn set<C: ConnectionLike + Send>(conn: &mut C, key: &str, value: &str) -> Result<(), CacheClientError> {
    conn.set::<_, _, ()>(key, value).await?;
    Ok(())
}

pub(super) async fn set_nx_px<C: ConnectionLike + Send>(
    conn: &mut C,
    key: &str,
    value: &str,
    expiry: Duration,
) -> Result<bool, CacheClientError> {
    // PX 0 is rejected by the server; round sub-millisecond expiries up.
    let millis = u64::try_from(expiry.as_millis()).unwrap_or(u64::MAX).max(1);
    let reply: Option<String> = redis::cmd("SET")
        .arg(key)
        .arg(value)
        .arg("NX")
        .arg("PX")
        .arg(millis)
        .query_async(conn)
        .await?;
    Ok(reply.is_some())
}

pub(super) async fn get<C: ConnectionLike + Send>(conn: &mut C, key: &str) -> Result<Option<String>, CacheClientError> {
    Ok(conn.get::<_, Option<String>>(key).await?)
}

pub(super) async fn pttl<C: ConnectionLike + Send>(conn: &mut C, key: &str) -> Result<i64, CacheClientError> {
    Ok(conn.pttl::<_, i64>(key).await?)
}
