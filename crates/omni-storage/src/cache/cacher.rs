//! Cache contract addressed by composite keys.

use async_trait::async_trait;
use omni_core::{exception, TechResult};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Separator between the primary key and the sub-key.
pub const KEY_SEPARATOR: &str = ":";

/// Joins a primary key and a sub-key into the key sent to the server.
///
/// No escaping is performed: `("a:b", "c")` and `("a", "b:c")` address the
/// same entry.
#[must_use]
pub fn composite_key(key: &str, sub_key: &str) -> String {
    let mut composite = String::with_capacity(key.len() + KEY_SEPARATOR.len() + sub_key.len());
    composite.push_str(key);
    composite.push_str(KEY_SEPARATOR);
    composite.push_str(sub_key);
    composite
}

/// Cache operations addressed by `(key, sub_key)`.
///
/// Every failure, including a miss on [`get`](Cacher::get), is reported as a
/// logged [`omni_core::TechnicalError`].
#[async_trait]
pub trait Cacher: Send + Sync {
    /// Stores `value`, replacing any existing entry.
    ///
    /// The existing entry is deleted first. A zero `expiry` then writes
    /// unconditionally with no expiry; a non-zero `expiry` writes only if the
    /// key is absent and expires it after `expiry`. If another writer claims
    /// the key between the delete and the conditional write, the call fails
    /// with an "already exists" error.
    async fn set(&self, key: &str, sub_key: &str, value: &str, expiry: Duration) -> TechResult<()>;

    /// Removes the entry. Removing an absent entry succeeds.
    async fn delete(&self, key: &str, sub_key: &str) -> TechResult<()>;

    /// Returns the stored value. An absent entry is an error.
    async fn get(&self, key: &str, sub_key: &str) -> TechResult<String>;

    /// Returns the stored value, or `None` if the entry is absent.
    async fn lookup(&self, key: &str, sub_key: &str) -> TechResult<Option<String>>;

    /// Returns the remaining time-to-live, to the millisecond.
    ///
    /// Server sentinels are passed through: `-1s` for an entry without
    /// expiry, `-2s` for an absent entry.
    async fn ttl(&self, key: &str, sub_key: &str) -> TechResult<chrono::Duration>;
}

/// Typed JSON helpers over any [`Cacher`].
#[async_trait]
pub trait CacherExt: Cacher {
    /// Serializes `value` as JSON and stores it with [`Cacher::set`].
    async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        sub_key: &str,
        value: &T,
        expiry: Duration,
    ) -> TechResult<()> {
        let json = serde_json::to_string(value).map_err(|e| exception("failed to encode cache value", &e))?;
        self.set(key, sub_key, &json, expiry).await
    }

    /// Reads the entry with [`Cacher::get`] and deserializes it from JSON.
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str, sub_key: &str) -> TechResult<T> {
        let json = self.get(key, sub_key).await?;
        serde_json::from_str(&json).map_err(|e| exception("failed to decode cache value", &e))
    }
}

// Blanket implementation for all Cacher implementations
impl<T: Cacher + ?Sized> CacherExt for T {}
