//! Shared response envelope for API handlers.
//!
//! Successful responses are flat JSON objects carrying `"success": true`
//! next to the payload fields. Use [`Success`] instead of ad-hoc
//! `serde_json::json!` bodies so payloads stay typed.

use serde::Serialize;

/// `{ "success": true, ...T }` response envelope.
///
/// `T` must serialize to a JSON object; its fields are flattened.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Success::new(VerifyOtpResponse { message })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
