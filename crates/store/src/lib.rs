//! Key-value storage for verification codes, cooldowns and award history.
//!
//! The [`KvStore`] trait is the only thing the rest of the system sees of
//! the storage engine. [`MemoryStore`] and [`RedisStore`] implement it;
//! the typed [`repositories`] sit on top.

pub mod error;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod redis_store;
pub mod repositories;

use std::sync::Arc;

use spinwin_core::clock::Clock;

pub use error::{StoreError, StoreResult};
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Shared handle to whichever backend is configured.
pub type SharedStore = Arc<dyn KvStore>;

/// Open the store named by `url`.
///
/// `memory://` (or an empty string) selects the in-process store;
/// `redis://` and `rediss://` connect to Redis.
pub async fn connect(url: &str, clock: Arc<dyn Clock>) -> StoreResult<SharedStore> {
    let url = url.trim();
    if url.is_empty() || url.starts_with("memory://") {
        return Ok(Arc::new(MemoryStore::with_clock(clock)));
    }
    if url.starts_with("redis://") || url.starts_with("rediss://") {
        return Ok(Arc::new(RedisStore::connect(url).await?));
    }
    Err(StoreError::UnsupportedUrl(url.to_string()))
}

/// Verify the store answers.
pub async fn health_check(store: &dyn KvStore) -> StoreResult<()> {
    store.ping().await
}
