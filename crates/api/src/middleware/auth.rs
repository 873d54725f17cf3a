//! Static bearer-token guards.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use spinwin_core::error::CoreError;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Admin access. Use as a handler argument:
///
/// ```ignore
/// async fn list_offers(_admin: RequireAdmin, State(state): State<AppState>) -> AppResult<...>
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_bearer(parts, &state.config.admin_api_key)?;
        Ok(RequireAdmin)
    }
}

/// Access to the maintenance endpoint.
pub struct RequireCleanupKey;

impl FromRequestParts<AppState> for RequireCleanupKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_bearer(parts, &state.config.cleanup_api_key)?;
        Ok(RequireCleanupKey)
    }
}

fn check_bearer(parts: &Parts, expected: &str) -> Result<(), AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

    if expected.is_empty() || !bool::from(token.trim().as_bytes().ct_eq(expected.as_bytes())) {
        tracing::warn!(path = %parts.uri.path(), "Rejected bearer token");
        return Err(unauthorized("Invalid token"));
    }
    Ok(())
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}
