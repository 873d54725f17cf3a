//! Handlers for the admin reconciliation view (`/admin/offers`).
//!
//! All handlers require the admin bearer token via [`RequireAdmin`].

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use spinwin_core::history::HistoryEntry;
use spinwin_core::reconciliation::{OfferQuery, ReconciledOffer};
use spinwin_core::types::Timestamp;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::Success;
use crate::state::AppState;

/// The only action `POST /admin/offers` understands.
const ACTION_MARK_CONSUMED: &str = "mark_consumed";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/admin/offers`. Blank values do not filter.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct OfferFilters {
    pub date: Option<String>,
    #[serde(alias = "email")]
    pub contact: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOffersResponse {
    pub offers: Vec<ReconciledOffer>,
    pub total_count: usize,
    pub filters: OfferFilters,
    pub generated_at: Timestamp,
}

/// Request body for `POST /api/admin/offers`.
#[derive(Debug, Deserialize)]
pub struct OfferActionRequest {
    #[serde(default)]
    pub action: String,
    /// A registered contact (targets its latest offer) or an offer id.
    #[serde(default)]
    pub identifier: String,
    /// Defaults to `true`; `false` clears the flag.
    pub consumed: Option<bool>,
    /// Staff member recorded as `consumedBy`.
    pub staff: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferActionResponse {
    pub message: &'static str,
    pub updated_count: u64,
    pub offer: HistoryEntry,
    pub action_time: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/offers?date=YYYY-MM-DD&contact=...&status=active|expired|consumed|all
pub async fn list_offers(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(filters): Query<OfferFilters>,
) -> AppResult<Json<Success<ListOffersResponse>>> {
    let query = OfferQuery::from_raw(
        filters.date.as_deref(),
        filters.contact.as_deref(),
        filters.status.as_deref(),
    )?;
    let offers = state.reconciliation().list_offers(&query).await?;
    tracing::debug!(count = offers.len(), "Admin offer listing");

    Ok(Json(Success::new(ListOffersResponse {
        total_count: offers.len(),
        offers,
        filters,
        generated_at: state.clock.now(),
    })))
}

/// POST /api/admin/offers
pub async fn offer_action(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<OfferActionRequest>,
) -> AppResult<Json<Success<OfferActionResponse>>> {
    let action = input.action.trim();
    if action.is_empty() || input.identifier.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Action and identifier are required".into(),
        ));
    }
    if action != ACTION_MARK_CONSUMED {
        return Err(AppError::BadRequest(format!(
            "Unknown action '{action}'. Expected '{ACTION_MARK_CONSUMED}'"
        )));
    }

    let staff = input
        .staff
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let offer = state
        .reconciliation()
        .set_consumed(&input.identifier, input.consumed.unwrap_or(true), staff)
        .await?;

    Ok(Json(Success::new(OfferActionResponse {
        message: "Offer(s) updated successfully",
        updated_count: 1,
        offer,
        action_time: state.clock.now(),
    })))
}
