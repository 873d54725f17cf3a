//! In-process store used for development, tests and single-instance deploys.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use spinwin_core::clock::{Clock, SystemClock};
use spinwin_core::types::Timestamp;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::kv::KvStore;

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<Timestamp>,
}

impl StoredValue {
    fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// A `HashMap` behind a `RwLock`, with expiry judged against a [`Clock`].
///
/// Expired keys are hidden on read and removed either lazily or by
/// [`KvStore::purge_expired`].
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of keys currently held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(stored) if !stored.is_expired(now) => return Ok(Some(stored.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|s| s.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.write().await.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_with_expiry(&self, key: &str, seconds: u64, value: &str) -> StoreResult<()> {
        let ttl = i64::try_from(seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX);
        let expires_at = self.clock.now().checked_add_signed(ttl);
        self.entries.write().await.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn purge_expired(&self) -> StoreResult<u64> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired(now));
        let purged = (before - entries.len()) as u64;
        if purged > 0 {
            tracing::debug!(purged, "Memory store: purged expired keys");
        }
        Ok(purged)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use spinwin_core::clock::ManualClock;

    fn store() -> (Arc<ManualClock>, MemoryStore) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
        ));
        let store = MemoryStore::with_clock(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn set_get_delete() {
        let (_, store) = store();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn value_expires_at_ttl() {
        let (clock, store) = store();
        store.set_with_expiry("otp:x", 600, "123456").await.unwrap();

        clock.advance(chrono::Duration::seconds(599));
        assert!(store.get("otp:x").await.unwrap().is_some());

        clock.advance(chrono::Duration::seconds(1));
        assert!(store.get("otp:x").await.unwrap().is_none());
        // Lazy removal on read.
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn huge_ttl_never_expires() {
        let (clock, store) = store();
        let ttls = [
            ("a", i64::MAX as u64 / 1000 + 1),
            ("b", i64::MAX as u64),
            ("c", u64::MAX),
        ];
        for (key, ttl) in ttls {
            store.set_with_expiry(key, ttl, "v").await.unwrap();
        }
        clock.advance(chrono::Duration::days(365 * 1000));
        store.purge_expired().await.unwrap();
        for key in ["a", "b", "c"] {
            assert_eq!(store.get(key).await.unwrap().as_deref(), Some("v"));
        }
    }

    #[tokio::test]
    async fn plain_set_clears_previous_ttl() {
        let (clock, store) = store();
        store.set_with_expiry("k", 1, "a").await.unwrap();
        store.set("k", "b").await.unwrap();
        clock.advance(chrono::Duration::hours(1));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn purge_drops_only_expired() {
        let (clock, store) = store();
        store.set_with_expiry("a", 10, "1").await.unwrap();
        store.set_with_expiry("b", 100, "2").await.unwrap();
        store.set("c", "3").await.unwrap();

        clock.advance(chrono::Duration::seconds(50));
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.len().await, 2);
    }
}
