//! Handlers for the on-demand maintenance sweep (`/cleanup`).

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use spinwin_core::maintenance::SweepStats;
use spinwin_core::types::Timestamp;

use crate::error::AppResult;
use crate::middleware::auth::RequireCleanupKey;
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: &'static str,
    pub stats: SweepStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupUsage {
    pub message: &'static str,
    pub usage: &'static str,
    pub current_time: Timestamp,
}

/// POST /api/cleanup
pub async fn run_cleanup(
    _key: RequireCleanupKey,
    State(state): State<AppState>,
) -> AppResult<Json<Success<CleanupResponse>>> {
    let stats = state.sweeper().sweep().await?;

    Ok(Json(Success::new(CleanupResponse {
        message: "Cleanup completed successfully",
        stats,
    })))
}

/// GET /api/cleanup -- explains how to trigger a sweep.
pub async fn cleanup_usage(State(state): State<AppState>) -> Json<CleanupUsage> {
    Json(CleanupUsage {
        message: "Use POST request with proper authorization to trigger cleanup",
        usage: "POST /api/cleanup with Authorization: Bearer <CLEANUP_API_KEY>",
        current_time: state.clock.now(),
    })
}
