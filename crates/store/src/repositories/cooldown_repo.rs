//! Cooldown markers: the instant of a contact's last award.

use chrono::DateTime;
use spinwin_core::types::Timestamp;

use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::kv::KvStore;

/// Reads and writes `cooldown:{contact}` markers (epoch millis as text).
pub struct CooldownRepo;

impl CooldownRepo {
    pub async fn last_award(store: &dyn KvStore, contact: &str) -> StoreResult<Option<Timestamp>> {
        let key = keys::cooldown(contact);
        let Some(raw) = store.get(&key).await? else {
            return Ok(None);
        };
        let millis: i64 = raw.trim().parse().map_err(|_| StoreError::Corrupt {
            key: key.clone(),
            reason: format!("expected epoch millis, got '{raw}'"),
        })?;
        DateTime::from_timestamp_millis(millis)
            .map(Some)
            .ok_or_else(|| StoreError::Corrupt {
                key,
                reason: format!("timestamp {millis} out of range"),
            })
    }

    /// Record an award at `awarded_at`, expiring after `ttl_secs`.
    pub async fn mark(
        store: &dyn KvStore,
        contact: &str,
        awarded_at: Timestamp,
        ttl_secs: u64,
    ) -> StoreResult<()> {
        store
            .set_with_expiry(
                &keys::cooldown(contact),
                ttl_secs,
                &awarded_at.timestamp_millis().to_string(),
            )
            .await
    }

    pub async fn clear(store: &dyn KvStore, contact: &str) -> StoreResult<bool> {
        store.delete(&keys::cooldown(contact)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn round_trips_millisecond_precision() {
        let store = MemoryStore::new();
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 13, 5, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        CooldownRepo::mark(&store, "a@b.com", t, 60).await.unwrap();
        assert_eq!(CooldownRepo::last_award(&store, "a@b.com").await.unwrap(), Some(t));
    }

    #[tokio::test]
    async fn garbage_marker_is_reported() {
        let store = MemoryStore::new();
        store.set("cooldown:a@b.com", "yesterday").await.unwrap();
        let err = CooldownRepo::last_award(&store, "a@b.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
