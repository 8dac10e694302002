//! # Omni Storage
//!
//! Access layer for the stores a service talks to: a key/value cache with
//! single-node and clustered backends, a MongoDB database factory, and a
//! PostgreSQL connection pool.

pub mod cache;
pub mod mongo;
pub mod postgres;

pub use cache::{
    composite_key, connect_cacher, CacheClient, CacheClientError, Cacher, CacherExt, ClusterClient, RedisCache,
    SingleNodeClient,
};
pub use mongo::connect_mongo;
pub use postgres::{postgres_url, PostgresPool};
