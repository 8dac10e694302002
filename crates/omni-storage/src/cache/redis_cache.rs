//! Cache policy shared by every backend.

use super::cacher::{composite_key, Cacher};
use super::client::{CacheClient, CacheClientError};
use async_trait::async_trait;
use omni_config::CacheTopology;
use omni_core::{exception, TechResult, TechnicalError};
use std::time::Duration;
use tracing::{debug, error_span, Instrument, Span};

/// [`Cacher`] over any [`CacheClient`].
pub struct RedisCache<C> {
    client: C,
    span: Span,
}

impl<C: CacheClient> RedisCache<C> {
    /// Creates a cache over `client`; every operation logs under `span`.
    #[must_use]
    pub fn new(client: C, span: Span) -> Self {
        Self { client, span }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Normalizes a failed `op` on `(key, sub_key)`.
    fn fail(&self, op: &str, key: &str, sub_key: &str, err: &CacheClientError) -> TechnicalError {
        let message = match self.client.topology() {
            CacheTopology::Single => format!("failed on {} ops", op),
            CacheTopology::Cluster => format!("failed on cluster {} ops", op),
        };
        error_span!("cache_op", op, key, sub_key).in_scope(|| exception(&message, err))
    }
}

impl<C> std::fmt::Debug for RedisCache<C>
where
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").field("client", &self.client).finish()
    }
}

#[async_trait]
impl<C: CacheClient> Cacher for RedisCache<C> {
    async fn set(&self, key: &str, sub_key: &str, value: &str, expiry: Duration) -> TechResult<()> {
        let composite = composite_key(key, sub_key);

        async {
            self.client
                .del(&composite)
                .await
                .map_err(|e| self.fail("delete", key, sub_key, &e))?;

            if expiry.is_zero() {
                self.client
                    .set(&composite, value)
                    .await
                    .map_err(|e| self.fail("set", key, sub_key, &e))?;
            } else {
                let applied = self
                    .client
                    .set_nx_px(&composite, value, expiry)
                    .await
                    .map_err(|e| self.fail("setnx", key, sub_key, &e))?;
                if !applied {
                    return Err(self.fail("setnx", key, sub_key, &CacheClientError::AlreadyExists(composite.clone())));
                }
            }

            debug!("Cached key '{}' with expiry {:?}", composite, expiry);
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn delete(&self, key: &str, sub_key: &str) -> TechResult<()> {
        let composite = composite_key(key, sub_key);

        async {
            self.client
                .del(&composite)
                .await
                .map_err(|e| self.fail("delete", key, sub_key, &e))?;
            debug!("Deleted key '{}'", composite);
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn get(&self, key: &str, sub_key: &str) -> TechResult<String> {
        match self.lookup(key, sub_key).await? {
            Some(value) => Ok(value),
            None => Err(self
                .span
                .in_scope(|| self.fail("get", key, sub_key, &CacheClientError::Nil))),
        }
    }

    async fn lookup(&self, key: &str, sub_key: &str) -> TechResult<Option<String>> {
        let composite = composite_key(key, sub_key);

        async {
            let value = self
                .client
                .get(&composite)
                .await
                .map_err(|e| self.fail("get", key, sub_key, &e))?;

            match &value {
                Some(_) => debug!("Cache hit for key '{}'", composite),
                None => debug!("Cache miss for key '{}'", composite),
            }

            Ok(value)
        }
        .instrument(self.span.clone())
        .await
    }

    async fn ttl(&self, key: &str, sub_key: &str) -> TechResult<chrono::Duration> {
        let composite = composite_key(key, sub_key);

        async {
            let millis = self
                .client
                .pttl(&composite)
                .await
                .map_err(|e| self.fail("TTL", key, sub_key, &e))?;
            Ok(remaining(millis))
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Converts a `PTTL` reply, keeping the `-1` (no expiry) and `-2` (absent)
/// sentinels as whole seconds.
fn remaining(millis: i64) -> chrono::Duration {
    match millis {
        -1 | -2 => chrono::Duration::seconds(millis),
        _ => chrono::Duration::milliseconds(millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacherExt;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory stand-in for a cache server with a manually advanced clock.
    struct MemoryClient {
        topology: CacheTopology,
        state: Mutex<MemoryState>,
        /// When set, a competing writer re-creates every key right after it
        /// is deleted.
        racing_writer: AtomicBool,
    }

    #[derive(Default)]
    struct MemoryState {
        now: Duration,
        entries: HashMap<String, (String, Option<Duration>)>,
    }

    impl MemoryState {
        fn live(&mut self, key: &str) -> Option<&(String, Option<Duration>)> {
            let now = self.now;
            if matches!(self.entries.get(key), Some((_, Some(deadline))) if *deadline <= now) {
                self.entries.remove(key);
            }
            self.entries.get(key)
        }
    }

    impl MemoryClient {
        fn new(topology: CacheTopology) -> Self {
            Self {
                topology,
                state: Mutex::new(MemoryState::default()),
                racing_writer: AtomicBool::new(false),
            }
        }

        fn advance(&self, by: Duration) {
            self.state.lock().unwrap().now += by;
        }
    }

    #[async_trait]
    impl CacheClient for MemoryClient {
        fn topology(&self) -> CacheTopology {
            self.topology
        }

        async fn del(&self, key: &str) -> Result<(), CacheClientError> {
            let mut state = self.state.lock().unwrap();
            state.entries.remove(key);
            if self.racing_writer.load(Ordering::SeqCst) {
                state.entries.insert(key.to_string(), ("racer".to_string(), None));
            }
            Ok(())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), CacheClientError> {
            let mut state = self.state.lock().unwrap();
            state.entries.insert(key.to_string(), (value.to_string(), None));
            Ok(())
        }

        async fn set_nx_px(&self, key: &str, value: &str, expiry: Duration) -> Result<bool, CacheClientError> {
            let mut state = self.state.lock().unwrap();
            if state.live(key).is_some() {
                return Ok(false);
            }
            let deadline = state.now + expiry;
            state.entries.insert(key.to_string(), (value.to_string(), Some(deadline)));
            Ok(true)
        }

        async fn get(&self, key: &str) -> Result<Option<String>, CacheClientError> {
            let mut state = self.state.lock().unwrap();
            Ok(state.live(key).map(|(value, _)| value.clone()))
        }

        async fn pttl(&self, key: &str) -> Result<i64, CacheClientError> {
            let mut state = self.state.lock().unwrap();
            let now = state.now;
            Ok(match state.live(key) {
                None => -2,
                Some((_, None)) => -1,
                Some((_, Some(deadline))) => i64::try_from((*deadline - now).as_millis()).unwrap_or(i64::MAX),
            })
        }
    }

    /// Client whose server is unreachable.
    struct UnreachableClient;

    #[async_trait]
    impl CacheClient for UnreachableClient {
        fn topology(&self) -> CacheTopology {
            CacheTopology::Cluster
        }

        async fn del(&self, _key: &str) -> Result<(), CacheClientError> {
            Err(CacheClientError::Pool("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), CacheClientError> {
            Err(CacheClientError::Pool("connection refused".to_string()))
        }

        async fn set_nx_px(&self, _key: &str, _value: &str, _expiry: Duration) -> Result<bool, CacheClientError> {
            Err(CacheClientError::Pool("connection refused".to_string()))
        }

        async fn get(&self, _key: &str) -> Result<Option<String>, CacheClientError> {
            Err(CacheClientError::Pool("connection refused".to_string()))
        }

        async fn pttl(&self, _key: &str) -> Result<i64, CacheClientError> {
            Err(CacheClientError::Pool("connection refused".to_string()))
        }
    }

    fn cache(topology: CacheTopology) -> RedisCache<MemoryClient> {
        RedisCache::new(MemoryClient::new(topology), Span::none())
    }

    const TOPOLOGIES: [CacheTopology; 2] = [CacheTopology::Single, CacheTopology::Cluster];

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            cache.set("user:42", "profile", "{\"name\":\"Ada\"}", Duration::ZERO).await.unwrap();
            assert_eq!(cache.get("user:42", "profile").await.unwrap(), "{\"name\":\"Ada\"}");
        }
    }

    #[tokio::test]
    async fn test_value_is_stored_under_composite_key() {
        let cache = cache(CacheTopology::Single);
        cache.set("user:42", "profile", "ada", Duration::ZERO).await.unwrap();
        let raw = cache.client().get("user:42:profile").await.unwrap();
        assert_eq!(raw.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn test_zero_expiry_never_expires() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            cache.set("config", "flags", "on", Duration::ZERO).await.unwrap();
            assert_eq!(cache.ttl("config", "flags").await.unwrap(), chrono::Duration::seconds(-1));
            cache.client().advance(Duration::from_secs(86_400));
            assert_eq!(cache.get("config", "flags").await.unwrap(), "on");
        }
    }

    #[tokio::test]
    async fn test_overwrite_keeps_latest_value() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            cache.set("session", "abc", "v1", Duration::ZERO).await.unwrap();
            cache.set("session", "abc", "v2", Duration::ZERO).await.unwrap();
            assert_eq!(cache.get("session", "abc").await.unwrap(), "v2");
        }
    }

    #[tokio::test]
    async fn test_set_with_expiry_replaces_plain_entry() {
        let cache = cache(CacheTopology::Single);
        cache.set("otp", "+6281234", "111111", Duration::ZERO).await.unwrap();
        cache.set("otp", "+6281234", "552011", Duration::from_secs(300)).await.unwrap();
        assert_eq!(cache.get("otp", "+6281234").await.unwrap(), "552011");
    }

    #[tokio::test]
    async fn test_otp_expires() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            let five_minutes = Duration::from_secs(300);
            cache.set("otp", "+6281234", "552011", five_minutes).await.unwrap();

            let ttl = cache.ttl("otp", "+6281234").await.unwrap();
            assert!(ttl > chrono::Duration::zero());
            assert!(ttl <= chrono::Duration::seconds(300));

            cache.client().advance(five_minutes + Duration::from_secs(1));
            let err = cache.get("otp", "+6281234").await.unwrap_err();
            assert_eq!(err.exception, "redis: nil");
            assert_eq!(cache.ttl("otp", "+6281234").await.unwrap(), chrono::Duration::seconds(-2));
        }
    }

    #[tokio::test]
    async fn test_fractional_expiry_ttl_stays_within_bounds() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            let expiry = Duration::from_millis(1600);
            cache.set("otp", "+6281234", "552011", expiry).await.unwrap();

            let ttl = cache.ttl("otp", "+6281234").await.unwrap();
            assert!(ttl > chrono::Duration::zero());
            assert!(ttl <= chrono::Duration::milliseconds(1600));

            cache.client().advance(Duration::from_millis(1200));
            let ttl = cache.ttl("otp", "+6281234").await.unwrap();
            assert_eq!(ttl, chrono::Duration::milliseconds(400));
        }
    }

    #[test]
    fn test_remaining_keeps_sentinels() {
        assert_eq!(remaining(-1), chrono::Duration::seconds(-1));
        assert_eq!(remaining(-2), chrono::Duration::seconds(-2));
        assert_eq!(remaining(0), chrono::Duration::zero());
        assert_eq!(remaining(1_599), chrono::Duration::milliseconds(1_599));
    }

    #[tokio::test]
    async fn test_rapid_expiring_sets_succeed_or_report_existing_key() {
        let cache = cache(CacheTopology::Single);
        let expiry = Duration::from_secs(60);
        cache.set("otp", "+6281234", "1", expiry).await.unwrap();

        match cache.set("otp", "+6281234", "2", expiry).await {
            Ok(()) => assert_eq!(cache.get("otp", "+6281234").await.unwrap(), "2"),
            Err(err) => assert!(err.exception.contains("already exists")),
        }
    }

    #[tokio::test]
    async fn test_racing_writer_reports_existing_key() {
        let cache = cache(CacheTopology::Cluster);
        cache.client().racing_writer.store(true, Ordering::SeqCst);

        let err = cache
            .set("otp", "+6281234", "552011", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert_eq!(err.exception, "key 'otp:+6281234' already exists");
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        for topology in TOPOLOGIES {
            let cache = cache(topology);
            assert!(cache.delete("missing", "key").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = cache(CacheTopology::Single);
        cache.set("cart", "7", "[]", Duration::ZERO).await.unwrap();
        cache.delete("cart", "7").await.unwrap();
        assert!(cache.get("cart", "7").await.is_err());
    }

    #[tokio::test]
    async fn test_get_miss_is_technical_error() {
        let cache = cache(CacheTopology::Single);
        let err = cache.get("missing", "key").await.unwrap_err();
        assert_eq!(err.exception, "redis: nil");
        assert!(!err.ticket.is_empty());
        assert!(err.occurred > 0);
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_miss() {
        let cache = cache(CacheTopology::Single);
        assert_eq!(cache.lookup("missing", "key").await.unwrap(), None);

        cache.set("present", "key", "yes", Duration::ZERO).await.unwrap();
        assert_eq!(cache.lookup("present", "key").await.unwrap().as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn test_backend_failures_are_technical_errors() {
        let cache = RedisCache::new(UnreachableClient, Span::none());

        let set = cache.set("k", "p", "v", Duration::ZERO).await.unwrap_err();
        let delete = cache.delete("k", "p").await.unwrap_err();
        let get = cache.get("k", "p").await.unwrap_err();
        let lookup = cache.lookup("k", "p").await.unwrap_err();
        let ttl = cache.ttl("k", "p").await.unwrap_err();

        for err in [&set, &delete, &get, &lookup, &ttl] {
            assert_eq!(err.exception, "connection pool: connection refused");
        }

        let tickets: std::collections::HashSet<_> =
            [set, delete, get, lookup, ttl].into_iter().map(|e| e.ticket).collect();
        assert_eq!(tickets.len(), 5);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u8,
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = cache(CacheTopology::Single);
        let profile = Profile {
            name: "Ada".to_string(),
            age: 36,
        };

        cache.set_json("user:42", "profile", &profile, Duration::ZERO).await.unwrap();
        let loaded: Profile = cache.get_json("user:42", "profile").await.unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_json_decode_failure_is_technical_error() {
        let cache = cache(CacheTopology::Single);
        cache.set("user:42", "profile", "not json", Duration::ZERO).await.unwrap();
        let result = cache.get_json::<Profile>("user:42", "profile").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let cacher: std::sync::Arc<dyn Cacher> = std::sync::Arc::new(cache(CacheTopology::Cluster));
        cacher.set("k", "p", "v", Duration::ZERO).await.unwrap();
        assert_eq!(cacher.get("k", "p").await.unwrap(), "v");
        assert!(cacher.get_json::<u32>("k", "p").await.is_err());
    }
}
