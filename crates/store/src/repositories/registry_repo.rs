//! Registry of every contact that has been awarded at least once.
//!
//! Lets the admin view enumerate histories without scanning the keyspace.

use crate::error::StoreResult;
use crate::keys::REGISTRY_KEY;
use crate::kv::KvStore;

pub struct RegistryRepo;

impl RegistryRepo {
    /// Registered contacts in insertion order.
    pub async fn list(store: &dyn KvStore) -> StoreResult<Vec<String>> {
        match store.get(REGISTRY_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn contains(store: &dyn KvStore, contact: &str) -> StoreResult<bool> {
        Ok(Self::list(store).await?.iter().any(|c| c == contact))
    }

    /// Add `contact` if absent. Returns `true` when it was newly added.
    pub async fn register(store: &dyn KvStore, contact: &str) -> StoreResult<bool> {
        let mut contacts = Self::list(store).await?;
        if contacts.iter().any(|c| c == contact) {
            return Ok(false);
        }
        contacts.push(contact.to_string());
        store
            .set(REGISTRY_KEY, &serde_json::to_string(&contacts)?)
            .await?;
        Ok(true)
    }

    /// Drop every contact in `gone`. Returns how many were removed.
    pub async fn remove_all(store: &dyn KvStore, gone: &[String]) -> StoreResult<u64> {
        if gone.is_empty() {
            return Ok(0);
        }
        let mut contacts = Self::list(store).await?;
        let before = contacts.len();
        contacts.retain(|c| !gone.contains(c));
        let removed = (before - contacts.len()) as u64;
        if removed > 0 {
            store
                .set(REGISTRY_KEY, &serde_json::to_string(&contacts)?)
                .await?;
        }
        Ok(removed)
    }
}
