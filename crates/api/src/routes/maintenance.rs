use axum::routing::get;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// ```text
/// GET    /cleanup  -> cleanup_usage
/// POST   /cleanup  -> run_cleanup (cleanup token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/cleanup",
        get(maintenance::cleanup_usage).post(maintenance::run_cleanup),
    )
}
