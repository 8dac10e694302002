//! Common test infrastructure for cache integration tests.

use omni_config::CacheConfig;
use omni_storage::{RedisCache, SingleNodeClient};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;
use tracing::Span;

/// Redis container plus a cache connected to it.
pub struct TestCache {
    _container: ContainerAsync<Redis>,
    pub config: CacheConfig,
    pub cache: RedisCache<SingleNodeClient>,
}

impl TestCache {
    /// Starts a fresh Redis container and connects a single-node cache.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = CacheConfig {
            pool_size: 4,
            min_idle: 2,
            ..CacheConfig::single(format!("127.0.0.1:{}", port))
        };

        let client = Self::connect_with_retry(&config, 30).await;

        Self {
            _container: container,
            config,
            cache: RedisCache::new(client, Span::none()),
        }
    }

    async fn connect_with_retry(config: &CacheConfig, max_attempts: u32) -> SingleNodeClient {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match SingleNodeClient::connect(config).await {
                Ok(client) => return client,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to Redis after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
