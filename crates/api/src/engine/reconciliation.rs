//! Admin view over every registered contact's award history.

use spinwin_core::clock::Clock;
use spinwin_core::cooldown::CooldownPolicy;
use spinwin_core::error::CoreError;
use spinwin_core::hashing::DISPLAY_ID_LEN;
use spinwin_core::history::HistoryEntry;
use spinwin_core::reconciliation::{reconcile, OfferQuery, ReconciledOffer};
use spinwin_store::repositories::{HistoryRepo, RegistryRepo};
use spinwin_store::KvStore;

use crate::error::AppResult;

pub struct ReconciliationView<'a> {
    store: &'a dyn KvStore,
    clock: &'a dyn Clock,
    policy: CooldownPolicy,
}

/// Where an identifier resolved to: a contact and an index into its history.
struct EntryRef {
    contact: String,
    index: usize,
}

impl<'a> ReconciliationView<'a> {
    pub fn new(store: &'a dyn KvStore, clock: &'a dyn Clock, policy: CooldownPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// All registered histories, filtered by `query`, newest first.
    pub async fn list_offers(&self, query: &OfferQuery) -> AppResult<Vec<ReconciledOffer>> {
        let mut entries = Vec::new();
        for contact in RegistryRepo::list(self.store).await? {
            entries.extend(HistoryRepo::list(self.store, &contact).await?);
        }
        Ok(reconcile(entries, query, &self.policy, self.clock.now()))
    }

    /// Set or clear the consumed flag on one history entry.
    ///
    /// `identifier` is either a registered contact, which targets that
    /// contact's latest entry, or an entry id. A full unique id matches
    /// exactly; a 12-character display id matches as a suffix and must be
    /// unambiguous. Returns the updated entry.
    pub async fn set_consumed(
        &self,
        identifier: &str,
        consumed: bool,
        staff: Option<&str>,
    ) -> AppResult<HistoryEntry> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CoreError::InvalidInput("Identifier is required".into()).into());
        }

        let target = self.resolve(identifier).await?;
        let mut history = HistoryRepo::list(self.store, &target.contact).await?;
        let entry = history.get_mut(target.index).ok_or_else(|| CoreError::NotFound {
            entity: "Offer",
            key: identifier.to_string(),
        })?;
        entry.set_consumed(consumed, staff, self.clock.now());
        let updated = entry.clone();
        HistoryRepo::save(self.store, &target.contact, &history).await?;

        tracing::info!(
            contact = %target.contact,
            display_id = updated.display_id(),
            consumed,
            staff = staff.unwrap_or("-"),
            "Offer consumption updated",
        );
        Ok(updated)
    }

    async fn resolve(&self, identifier: &str) -> AppResult<EntryRef> {
        let contacts = RegistryRepo::list(self.store).await?;
        let not_found = || CoreError::NotFound {
            entity: "Offer",
            key: identifier.to_string(),
        };

        if contacts.iter().any(|c| c == identifier) {
            let len = HistoryRepo::list(self.store, identifier).await?.len();
            return match len {
                0 => Err(not_found().into()),
                n => Ok(EntryRef {
                    contact: identifier.to_string(),
                    index: n - 1,
                }),
            };
        }

        let by_suffix = identifier.len() == DISPLAY_ID_LEN;
        let mut suffix_hits = Vec::new();
        for contact in contacts {
            let history = HistoryRepo::list(self.store, &contact).await?;
            if let Some(index) = history.iter().position(|e| e.unique_id == identifier) {
                return Ok(EntryRef { contact, index });
            }
            if by_suffix {
                suffix_hits.extend(
                    history
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.display_id() == identifier)
                        .map(|(index, _)| EntryRef {
                            contact: contact.clone(),
                            index,
                        }),
                );
            }
        }

        match suffix_hits.len() {
            0 => Err(not_found().into()),
            1 => Ok(suffix_hits.remove(0)),
            _ => Err(CoreError::InvalidInput(format!(
                "Display id '{identifier}' matches more than one offer; use the full id"
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cooldown::CooldownTracker;
    use crate::engine::selector::OfferSelector;
    use crate::engine::testing::fixture;
    use crate::error::AppError;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use spinwin_core::catalog::Catalog;
    use spinwin_core::history::{OfferStatus, StatusFilter};
    use spinwin_core::random::SequenceRandom;

    #[tokio::test]
    async fn lists_newest_first_with_status() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let rng = SequenceRandom::new([0.1, 0.0]);
        let policy = CooldownPolicy::utc();
        let tracker = CooldownTracker::new(&store, clock.as_ref(), policy);
        let selector = OfferSelector::new(&store, &rng, &catalog, tracker);

        selector.award("alice@example.com").await.unwrap();
        clock.advance(Duration::hours(1));
        selector.award("bob@example.com").await.unwrap();

        let view = ReconciliationView::new(&store, clock.as_ref(), policy);
        let offers = view.list_offers(&OfferQuery::default()).await.unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].entry.contact, "bob@example.com");
        assert!(offers.iter().all(|o| o.status == OfferStatus::Active));

        let query = OfferQuery::from_raw(None, Some("ALICE"), None).unwrap();
        let offers = view.list_offers(&query).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].display_id.len(), 12);
    }

    #[tokio::test]
    async fn consume_by_contact_then_by_unique_id() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let rng = SequenceRandom::new([0.1, 0.0]);
        let policy = CooldownPolicy::utc();
        let tracker = CooldownTracker::new(&store, clock.as_ref(), policy);
        let selector = OfferSelector::new(&store, &rng, &catalog, tracker);
        let first = selector.award("a@b.com").await.unwrap();
        clock.advance(Duration::days(1));
        let second = selector.award("a@b.com").await.unwrap();

        let view = ReconciliationView::new(&store, clock.as_ref(), policy);
        let updated = view.set_consumed("a@b.com", true, Some("sam")).await.unwrap();
        assert_eq!(updated.unique_id, second.entry.unique_id);
        assert_eq!(updated.consumed_by.as_deref(), Some("sam"));

        let updated = view
            .set_consumed(first.unique_id(), true, None)
            .await
            .unwrap();
        assert_eq!(updated.unique_id, first.entry.unique_id);

        let consumed = OfferQuery {
            status: StatusFilter::Only(OfferStatus::Consumed),
            ..Default::default()
        };
        assert_eq!(view.list_offers(&consumed).await.unwrap().len(), 2);

        let cleared = view
            .set_consumed(second.display_id(), false, None)
            .await
            .unwrap();
        assert!(!cleared.consumed);
        assert!(cleared.consumed_at.is_none());
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let (clock, store) = fixture();
        let view = ReconciliationView::new(&store, clock.as_ref(), CooldownPolicy::utc());
        let err = view.set_consumed("nobody", true, None).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));

        let err = view.set_consumed("   ", true, None).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidInput(_)));
    }
}
