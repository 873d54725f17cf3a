//! Handlers for contact verification (`/send-otp`, `/verify-otp`).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use spinwin_core::contact::ContactMethod;

use crate::error::AppResult;
use crate::response::Success;
use crate::state::AppState;

/// Request body for `POST /api/send-otp`.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub message: &'static str,
    /// Only present when `EXPOSE_OTP_IN_RESPONSE` is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Request body for `POST /api/verify-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub message: &'static str,
}

/// POST /api/send-otp
pub async fn send_otp(
    State(state): State<AppState>,
    Json(input): Json<SendOtpRequest>,
) -> AppResult<Json<Success<SendOtpResponse>>> {
    let method = ContactMethod::parse(input.method.trim())?;
    let issued = state.verifier().request_code(&input.contact, method).await?;

    Ok(Json(Success::new(SendOtpResponse {
        message: "OTP sent successfully",
        otp: state.config.expose_otp_in_response.then_some(issued.code),
    })))
}

/// POST /api/verify-otp
///
/// The code is single-use. A contact still in cooldown gets 429 after a
/// successful match.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<Success<VerifyOtpResponse>>> {
    state.verifier().verify_code(&input.contact, &input.otp).await?;

    Ok(Json(Success::new(VerifyOtpResponse {
        message: "OTP verified successfully",
    })))
}
