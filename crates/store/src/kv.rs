//! The key-value contract every backend implements.

use async_trait::async_trait;

use crate::error::StoreResult;

/// Minimal string key-value store with per-key expiry.
///
/// Each call is atomic on its own; there are no multi-key transactions.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value at `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` with no expiry, replacing any existing value and TTL.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Store `value` that expires after `seconds`.
    async fn set_with_expiry(&self, key: &str, seconds: u64, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if something was removed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Eagerly drop expired keys. Backends that expire natively return `0`.
    async fn purge_expired(&self) -> StoreResult<u64>;

    /// Cheap liveness probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
