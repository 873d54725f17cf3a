//! Per-contact award history, stored as a JSON array.

use spinwin_core::history::HistoryEntry;

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;

/// Reads and writes `history:{contact}`.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Entries oldest first. A missing key is an empty history.
    pub async fn list(store: &dyn KvStore, contact: &str) -> StoreResult<Vec<HistoryEntry>> {
        match store.get(&keys::history(contact)).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn latest(store: &dyn KvStore, contact: &str) -> StoreResult<Option<HistoryEntry>> {
        Ok(Self::list(store, contact).await?.pop())
    }

    /// Replace the stored history. An empty slice deletes the key.
    pub async fn save(
        store: &dyn KvStore,
        contact: &str,
        entries: &[HistoryEntry],
    ) -> StoreResult<()> {
        let key = keys::history(contact);
        if entries.is_empty() {
            store.delete(&key).await?;
            return Ok(());
        }
        let raw = serde_json::to_string(entries)?;
        store.set(&key, &raw).await
    }
}
