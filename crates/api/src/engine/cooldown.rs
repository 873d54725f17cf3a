//! Per-contact cooldown tracking on top of the store.

use spinwin_core::clock::Clock;
use spinwin_core::cooldown::{CooldownInfo, CooldownPolicy};
use spinwin_core::error::CoreError;
use spinwin_core::types::Timestamp;
use spinwin_store::repositories::{CooldownRepo, HistoryRepo};
use spinwin_store::KvStore;

use crate::error::AppResult;

/// Reads and writes cooldown markers and applies [`CooldownPolicy`].
#[derive(Clone, Copy)]
pub struct CooldownTracker<'a> {
    store: &'a dyn KvStore,
    clock: &'a dyn Clock,
    policy: CooldownPolicy,
}

impl<'a> CooldownTracker<'a> {
    pub fn new(store: &'a dyn KvStore, clock: &'a dyn Clock, policy: CooldownPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn next_eligible(&self, awarded_at: Timestamp) -> Timestamp {
        self.policy.next_eligible(awarded_at)
    }

    pub async fn is_eligible(&self, contact: &str) -> AppResult<bool> {
        let last = CooldownRepo::last_award(self.store, contact).await?;
        Ok(self.policy.is_eligible(last, self.now()))
    }

    pub async fn remaining(&self, contact: &str) -> AppResult<CooldownInfo> {
        let last = CooldownRepo::last_award(self.store, contact).await?;
        Ok(self.policy.remaining(last, self.now()))
    }

    /// Record an award at `at`. The marker expires at the next-eligible instant.
    pub async fn mark_awarded(&self, contact: &str, at: Timestamp) -> AppResult<()> {
        let ttl = self.policy.marker_ttl_secs(at);
        CooldownRepo::mark(self.store, contact, at, ttl).await?;
        tracing::debug!(contact, ttl_secs = ttl, "Cooldown marker written");
        Ok(())
    }

    /// Fail with [`CoreError::CooldownActive`] while `contact` is cooling down.
    ///
    /// The denial carries the remaining wait and the contact's latest award.
    pub async fn ensure_eligible(&self, contact: &str) -> AppResult<()> {
        let last = CooldownRepo::last_award(self.store, contact).await?;
        let now = self.now();
        if self.policy.is_eligible(last, now) {
            return Ok(());
        }
        let info = self.policy.remaining(last, now);
        let existing = HistoryRepo::latest(self.store, contact).await?;
        tracing::info!(contact, remaining = %info.display, "Cooldown active");
        Err(CoreError::cooldown(info, existing).into())
    }
}
