//! Offer awarding: eligibility check, weighted draw, history append.

use spinwin_core::catalog::{Catalog, Offer};
use spinwin_core::contact::normalize_contact;
use spinwin_core::cooldown::CooldownInfo;
use spinwin_core::history::{push_bounded, HistoryEntry};
use spinwin_core::random::RandomSource;
use spinwin_core::selector;
use spinwin_store::repositories::{HistoryRepo, RegistryRepo};
use spinwin_store::KvStore;

use crate::engine::cooldown::CooldownTracker;
use crate::error::AppResult;

const WIN_MESSAGE: &str = "Congratulations! You won an amazing offer!";
const LOSE_MESSAGE: &str = "Keep trying! Better luck next time!";

/// The result of a successful award.
#[derive(Debug, Clone)]
pub struct Award {
    pub entry: HistoryEntry,
    /// Wait until the contact may be awarded again, as of the award instant.
    pub cooldown_info: CooldownInfo,
    pub message: &'static str,
}

impl Award {
    pub fn unique_id(&self) -> &str {
        &self.entry.unique_id
    }

    pub fn display_id(&self) -> &str {
        self.entry.display_id()
    }
}

pub struct OfferSelector<'a> {
    store: &'a dyn KvStore,
    rng: &'a dyn RandomSource,
    catalog: &'a Catalog,
    cooldowns: CooldownTracker<'a>,
}

impl<'a> OfferSelector<'a> {
    pub fn new(
        store: &'a dyn KvStore,
        rng: &'a dyn RandomSource,
        catalog: &'a Catalog,
        cooldowns: CooldownTracker<'a>,
    ) -> Self {
        Self {
            store,
            rng,
            catalog,
            cooldowns,
        }
    }

    pub fn draw(&self) -> &'a Offer {
        selector::draw(self.catalog, self.rng)
    }

    /// Award an offer to an eligible contact.
    ///
    /// Appends to the contact's bounded history, registers the contact and
    /// starts its cooldown.
    pub async fn award(&self, contact: &str) -> AppResult<Award> {
        let contact = normalize_contact(contact)?;
        self.cooldowns.ensure_eligible(&contact).await?;

        let now = self.cooldowns.now();
        let next = self.cooldowns.next_eligible(now);
        let entry = HistoryEntry::new(self.draw().clone(), &contact, now, next);

        let mut history = HistoryRepo::list(self.store, &contact).await?;
        let evicted = push_bounded(&mut history, entry.clone());
        HistoryRepo::save(self.store, &contact, &history).await?;
        if RegistryRepo::register(self.store, &contact).await? {
            tracing::debug!(contact = %contact, "Contact registered");
        }
        self.cooldowns.mark_awarded(&contact, now).await?;

        tracing::info!(
            contact = %contact,
            offer_id = entry.offer.id,
            category = entry.offer.category.as_str(),
            display_id = entry.display_id(),
            evicted,
            "Offer awarded",
        );

        let message = if entry.offer.is_win() {
            WIN_MESSAGE
        } else {
            LOSE_MESSAGE
        };
        Ok(Award {
            cooldown_info: CooldownInfo::new(next, (next - now).num_milliseconds()),
            entry,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{day1, fixture};
    use crate::error::AppError;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use spinwin_core::catalog::OfferCategory;
    use spinwin_core::cooldown::CooldownPolicy;
    use spinwin_core::error::CoreError;
    use spinwin_core::history::MAX_HISTORY_ENTRIES;
    use spinwin_core::random::SequenceRandom;

    #[tokio::test]
    async fn draw_splits_on_win_probability() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let tracker = CooldownTracker::new(&store, clock.as_ref(), CooldownPolicy::utc());

        let win_rng = SequenceRandom::new([0.39, 0.0]);
        let win = OfferSelector::new(&store, &win_rng, &catalog, tracker).draw();
        assert_eq!(win.category, OfferCategory::Win);

        let lose_rng = SequenceRandom::new([0.41, 0.0]);
        let lose = OfferSelector::new(&store, &lose_rng, &catalog, tracker).draw();
        assert_eq!(lose.category, OfferCategory::Lose);
    }

    #[tokio::test]
    async fn award_succeeds_once_then_cools_down() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let rng = SequenceRandom::new([0.1, 0.0]);
        let tracker = CooldownTracker::new(&store, clock.as_ref(), CooldownPolicy::utc());
        let selector = OfferSelector::new(&store, &rng, &catalog, tracker);

        let award = selector.award("a@b.com").await.unwrap();
        assert_eq!(award.entry.offer.id, 1);
        assert_eq!(award.entry.timestamp, day1());
        assert_eq!(award.entry.next_eligible_at, day1() + Duration::days(1));
        assert_eq!(award.cooldown_info.hours, 24);
        assert_eq!(award.message, WIN_MESSAGE);
        assert_eq!(award.display_id().len(), 12);
        assert!(award.unique_id().ends_with(award.display_id()));
        assert!(RegistryRepo::contains(&store, "a@b.com").await.unwrap());

        clock.advance(Duration::hours(23));
        let err = selector.award("a@b.com").await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::CooldownActive(denial)) => {
            assert_eq!(denial.existing_offer.map(|e| e.unique_id), Some(award.entry.unique_id.clone()));
        });

        clock.advance(Duration::hours(1));
        let second = selector.award("a@b.com").await.unwrap();
        assert_eq!(HistoryRepo::list(&store, "a@b.com").await.unwrap().len(), 2);
        assert_ne!(second.unique_id(), award.unique_id());
    }

    #[tokio::test]
    async fn losing_award_gets_encouragement() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let rng = SequenceRandom::new([0.9, 0.0]);
        let tracker = CooldownTracker::new(&store, clock.as_ref(), CooldownPolicy::utc());
        let award = OfferSelector::new(&store, &rng, &catalog, tracker)
            .award("a@b.com")
            .await
            .unwrap();
        assert!(!award.entry.offer.is_win());
        assert_eq!(award.message, LOSE_MESSAGE);
    }

    #[tokio::test]
    async fn history_stays_bounded() {
        let (clock, store) = fixture();
        let catalog = Catalog::default();
        let rng = SequenceRandom::new([0.5, 0.5]);
        let tracker = CooldownTracker::new(&store, clock.as_ref(), CooldownPolicy::utc());
        let selector = OfferSelector::new(&store, &rng, &catalog, tracker);

        let first = selector.award("a@b.com").await.unwrap();
        for _ in 0..MAX_HISTORY_ENTRIES {
            clock.advance(Duration::days(1));
            selector.award("a@b.com").await.unwrap();
        }
        let history = HistoryRepo::list(&store, "a@b.com").await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert!(history.iter().all(|e| e.unique_id != first.entry.unique_id));
    }
}
