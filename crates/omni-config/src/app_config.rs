//! SDK configuration structures.

use omni_core::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root SDK configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Key/value cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Document store configuration.
    #[serde(default)]
    pub mongo: MongoConfig,

    /// Relational store configuration.
    #[serde(default)]
    pub postgres: PostgresConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "omni-service".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppMetadata {
    /// Returns true when running in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Cache deployment topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTopology {
    /// One endpoint.
    #[default]
    Single,
    /// Sharded cluster reached through a set of seed endpoints.
    Cluster,
}

impl CacheTopology {
    /// Returns the topology name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Cluster => "cluster",
        }
    }
}

impl std::fmt::Display for CacheTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Single-node or clustered deployment.
    pub topology: CacheTopology,
    /// `host:port` of the single node.
    pub addr: String,
    /// `host:port` seeds of the cluster.
    pub addrs: Vec<String>,
    /// Optional AUTH password.
    pub password: Option<String>,
    /// Logical database index (single node only).
    pub index: i64,
    /// Maximum pooled connections.
    pub pool_size: usize,
    /// Connections opened eagerly and kept idle in the pool.
    pub min_idle: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            topology: CacheTopology::Single,
            addr: "localhost:6379".to_string(),
            addrs: Vec::new(),
            password: None,
            index: 0,
            pool_size: 10,
            min_idle: 2,
        }
    }
}

impl CacheConfig {
    /// Returns a single-node configuration for `addr`.
    #[must_use]
    pub fn single(addr: impl Into<String>) -> Self {
        Self {
            topology: CacheTopology::Single,
            addr: addr.into(),
            ..Self::default()
        }
    }

    /// Returns a cluster configuration for the given seeds.
    #[must_use]
    pub fn cluster<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topology: CacheTopology::Cluster,
            addr: String::new(),
            addrs: addrs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    /// Maximum pooled connections per server.
    pub max_pool_size: u32,
    /// Connections kept open per server.
    pub min_pool_size: u32,
    /// Connect and server-selection timeout in seconds.
    pub timeout_secs: u64,
    /// Seconds a pooled connection may stay idle before being closed.
    pub max_idle_time_secs: u64,
    /// Database name.
    pub schema: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            max_pool_size: 20,
            min_pool_size: 2,
            timeout_secs: 10,
            max_idle_time_secs: 300,
            schema: "omni".to_string(),
        }
    }
}

impl MongoConfig {
    /// Returns the connection URI.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }

    /// Returns the timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the idle time as a Duration.
    #[must_use]
    pub const fn max_idle_time(&self) -> Duration {
        Duration::from_secs(self.max_idle_time_secs)
    }
}

/// Relational store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database name.
    pub schema: String,
    /// Raw query string appended to the URL (e.g. `sslmode=disable`).
    pub options: Option<String>,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "omni".to_string(),
            password: "omni".to_string(),
            schema: "omni".to_string(),
            options: None,
            min_connections: 2,
            max_connections: 20,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
