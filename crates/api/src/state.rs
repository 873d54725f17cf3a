use std::sync::Arc;

use spinwin_core::catalog::Catalog;
use spinwin_core::clock::Clock;
use spinwin_core::cooldown::CooldownPolicy;
use spinwin_core::random::RandomSource;
use spinwin_delivery::CodeSender;
use spinwin_store::SharedStore;

use crate::config::ServerConfig;
use crate::engine::{ContactVerifier, CooldownTracker, OfferSelector, ReconciliationView, Sweeper};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
/// The engine components are built per request from these parts.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store backend.
    pub store: SharedStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Verification-code delivery.
    pub sender: Arc<dyn CodeSender>,
    /// Time source for cooldown and expiry decisions.
    pub clock: Arc<dyn Clock>,
    /// Randomness for codes and offer draws.
    pub rng: Arc<dyn RandomSource>,
    /// The offer catalog.
    pub catalog: Arc<Catalog>,
    /// Cooldown rules in the configured reference offset.
    pub policy: CooldownPolicy,
}

impl AppState {
    pub fn cooldowns(&self) -> CooldownTracker<'_> {
        CooldownTracker::new(self.store.as_ref(), self.clock.as_ref(), self.policy)
    }

    pub fn verifier(&self) -> ContactVerifier<'_> {
        ContactVerifier::new(
            self.store.as_ref(),
            self.sender.as_ref(),
            self.rng.as_ref(),
            self.cooldowns(),
            self.config.otp_channels,
        )
    }

    pub fn selector(&self) -> OfferSelector<'_> {
        OfferSelector::new(
            self.store.as_ref(),
            self.rng.as_ref(),
            &self.catalog,
            self.cooldowns(),
        )
    }

    pub fn reconciliation(&self) -> ReconciliationView<'_> {
        ReconciliationView::new(self.store.as_ref(), self.clock.as_ref(), self.policy)
    }

    pub fn sweeper(&self) -> Sweeper<'_> {
        Sweeper::new(
            self.store.as_ref(),
            self.clock.as_ref(),
            self.policy,
            chrono::Duration::days(self.config.history_retention_days),
        )
    }
}
