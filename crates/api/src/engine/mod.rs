//! Domain engine: the stateful operations behind the HTTP handlers.
//!
//! Each component borrows the store, clock and randomness it needs from
//! [`AppState`](crate::state::AppState) for the duration of one request.
//! The pure rules they apply live in `spinwin_core`.

pub mod cooldown;
pub mod reconciliation;
pub mod selector;
pub mod sweep;
pub mod verifier;

pub use cooldown::CooldownTracker;
pub use reconciliation::ReconciliationView;
pub use selector::{Award, OfferSelector};
pub use sweep::Sweeper;
pub use verifier::{ContactVerifier, IssuedCode};
