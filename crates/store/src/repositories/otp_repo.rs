//! Pending verification codes.

use spinwin_core::otp::OTP_TTL_SECS;

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;

/// Stores at most one pending code per contact.
pub struct OtpRepo;

impl OtpRepo {
    /// Store `code` for `contact`, replacing any pending code.
    pub async fn put(store: &dyn KvStore, contact: &str, code: &str) -> StoreResult<()> {
        store
            .set_with_expiry(&keys::otp(contact), OTP_TTL_SECS, code)
            .await
    }

    pub async fn find(store: &dyn KvStore, contact: &str) -> StoreResult<Option<String>> {
        store.get(&keys::otp(contact)).await
    }

    pub async fn delete(store: &dyn KvStore, contact: &str) -> StoreResult<bool> {
        store.delete(&keys::otp(contact)).await
    }
}
