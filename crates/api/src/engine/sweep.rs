//! Maintenance sweep over the store.

use spinwin_core::clock::Clock;
use spinwin_core::cooldown::CooldownPolicy;
use spinwin_core::maintenance::{prune_older_than, SweepStats};
use spinwin_core::types::Timestamp;
use spinwin_store::repositories::{CooldownRepo, HistoryRepo, RegistryRepo};
use spinwin_store::{KvStore, StoreError};

use crate::error::AppResult;

pub struct Sweeper<'a> {
    store: &'a dyn KvStore,
    clock: &'a dyn Clock,
    policy: CooldownPolicy,
    retention: chrono::Duration,
}

impl<'a> Sweeper<'a> {
    pub fn new(
        store: &'a dyn KvStore,
        clock: &'a dyn Clock,
        policy: CooldownPolicy,
        retention: chrono::Duration,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            retention,
        }
    }

    /// Drop keys whose TTL has elapsed. Returns how many were dropped.
    pub async fn purge(&self) -> AppResult<u64> {
        Ok(self.store.purge_expired().await?)
    }

    /// Full pass: expired keys, stale cooldown markers, old history entries
    /// and contacts left with no history.
    pub async fn sweep(&self) -> AppResult<SweepStats> {
        let now = self.clock.now();
        let mut stats = SweepStats::started_at(now);
        stats.expired_keys = self.purge().await?;

        let cutoff = now - self.retention;
        let mut gone = Vec::new();
        for contact in RegistryRepo::list(self.store).await? {
            if self.clear_stale_cooldown(&contact, now).await? {
                stats.cleaned_cooldowns += 1;
            }

            let mut history = HistoryRepo::list(self.store, &contact).await?;
            let removed = prune_older_than(&mut history, cutoff);
            if removed > 0 {
                HistoryRepo::save(self.store, &contact, &history).await?;
                stats.cleaned_offers += removed;
            }
            if history.is_empty() {
                gone.push(contact);
            }
        }
        stats.cleaned_contacts = RegistryRepo::remove_all(self.store, &gone).await?;

        tracing::info!(
            expired_keys = stats.expired_keys,
            cleaned_offers = stats.cleaned_offers,
            cleaned_cooldowns = stats.cleaned_cooldowns,
            cleaned_contacts = stats.cleaned_contacts,
            "Sweep completed",
        );
        Ok(stats)
    }

    /// Delete a marker that no longer blocks anything, or that cannot be read.
    async fn clear_stale_cooldown(&self, contact: &str, now: Timestamp) -> AppResult<bool> {
        let stale = match CooldownRepo::last_award(self.store, contact).await {
            Ok(Some(at)) => self.policy.is_eligible(Some(at), now),
            Ok(None) => false,
            Err(StoreError::Corrupt { key, reason }) => {
                tracing::warn!(key = %key, reason = %reason, "Dropping unreadable cooldown marker");
                true
            }
            Err(e) => return Err(e.into()),
        };
        if !stale {
            return Ok(false);
        }
        Ok(CooldownRepo::clear(self.store, contact).await?)
    }
}
