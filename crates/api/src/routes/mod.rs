pub mod admin;
pub mod health;
pub mod maintenance;
pub mod offers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /send-otp                 issue a verification code (POST)
/// /verify-otp               check a verification code (POST)
/// /generate-offer           award an offer to a verified contact (POST)
///
/// /admin/offers             list (GET), mark consumed (POST); admin token
///
/// /cleanup                  run the sweep (POST, cleanup token), usage (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public flow: verify, then spin.
        .merge(offers::router())
        // Reconciliation for staff.
        .nest("/admin", admin::router())
        // Maintenance.
        .merge(maintenance::router())
}
