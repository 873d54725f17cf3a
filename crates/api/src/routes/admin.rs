//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the admin token (enforced by handler extractors).
///
/// ```text
/// GET    /offers   -> list_offers
/// POST   /offers   -> offer_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/offers",
        get(admin::list_offers).post(admin::offer_action),
    )
}
