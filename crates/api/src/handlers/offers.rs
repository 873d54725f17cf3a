//! Handler for `POST /api/generate-offer`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use spinwin_core::catalog::Offer;
use spinwin_core::cooldown::CooldownInfo;
use spinwin_core::types::Timestamp;

use crate::error::AppResult;
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateOfferRequest {
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOfferResponse {
    pub offer: Offer,
    pub unique_id: String,
    pub display_id: String,
    pub awarded_at: Timestamp,
    pub cooldown_info: CooldownInfo,
    pub message: &'static str,
}

/// POST /api/generate-offer
///
/// Draws and records an offer for an eligible contact. Returns 429 with the
/// contact's current offer while the cooldown is active.
pub async fn generate_offer(
    State(state): State<AppState>,
    Json(input): Json<GenerateOfferRequest>,
) -> AppResult<Json<Success<GenerateOfferResponse>>> {
    let award = state.selector().award(&input.contact).await?;

    Ok(Json(Success::new(GenerateOfferResponse {
        unique_id: award.unique_id().to_string(),
        display_id: award.display_id().to_string(),
        awarded_at: award.entry.timestamp,
        offer: award.entry.offer,
        cooldown_info: award.cooldown_info,
        message: award.message,
    })))
}
