//! Request guards implemented as Axum extractors.
//!
//! - [`auth::RequireAdmin`] -- bearer token must equal `ADMIN_API_KEY`.
//! - [`auth::RequireCleanupKey`] -- bearer token must equal `CLEANUP_API_KEY`.

pub mod auth;
