//! Route definitions for the public verification and award flow.

use axum::routing::post;
use axum::Router;

use crate::handlers::{offers, verification};
use crate::state::AppState;

/// ```text
/// POST   /send-otp        -> send_otp
/// POST   /verify-otp      -> verify_otp
/// POST   /generate-offer  -> generate_offer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(verification::send_otp))
        .route("/verify-otp", post(verification::verify_otp))
        .route("/generate-offer", post(offers::generate_offer))
}
