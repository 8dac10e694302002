//! Key/value cache access.
//!
//! [`Cacher`] is the contract callers program against. [`RedisCache`] is the
//! one implementation; it is generic over a [`CacheClient`] so the single-node
//! and clustered deployments share every line of cache policy and differ only
//! in how commands reach the server.

mod cacher;
mod client;
mod cluster;
mod redis_cache;
mod single;

pub use cacher::{composite_key, Cacher, CacherExt, KEY_SEPARATOR};
pub use client::{CacheClient, CacheClientError};
pub use cluster::ClusterClient;
pub use redis_cache::RedisCache;
pub use single::SingleNodeClient;

use omni_config::{CacheConfig, CacheTopology};
use omni_core::{OmniError, OmniResult};
use std::sync::Arc;
use tracing::{info, Span};
use url::Url;

/// Connects the backend selected by `config.topology`.
///
/// `span` is the logging context every cache operation runs under.
pub async fn connect_cacher(config: &CacheConfig, span: Span) -> OmniResult<Arc<dyn Cacher>> {
    let cacher: Arc<dyn Cacher> = match config.topology {
        CacheTopology::Single => Arc::new(RedisCache::new(SingleNodeClient::connect(config).await?, span)),
        CacheTopology::Cluster => Arc::new(RedisCache::new(ClusterClient::connect(config).await?, span)),
    };
    info!(topology = %config.topology, "Cache connected");
    Ok(cacher)
}

/// Builds a `redis://` URL for one node, percent-encoding the password.
pub(crate) fn node_url(addr: &str, password: Option<&str>, index: Option<i64>) -> OmniResult<Url> {
    let mut url = Url::parse(&format!("redis://{}", addr))
        .map_err(|e| OmniError::configuration(format!("Invalid cache address '{}': {}", addr, e)))?;

    if let Some(password) = password.filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|()| OmniError::configuration(format!("Cannot attach password to '{}'", addr)))?;
    }

    if let Some(index) = index {
        url.set_path(&format!("/{}", index));
    }

    Ok(url)
}
