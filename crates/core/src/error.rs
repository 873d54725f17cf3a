use crate::cooldown::CooldownInfo;
use crate::history::HistoryEntry;

/// Payload attached to a [`CoreError::CooldownActive`] rejection.
///
/// Carries everything the UI needs to show "come back later": the remaining
/// wait and the offer the contact already received.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownDenial {
    pub cooldown_info: CooldownInfo,
    pub existing_offer: Option<HistoryEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Cooldown active: next attempt in {}", .0.cooldown_info.display)]
    CooldownActive(Box<CooldownDenial>),

    #[error("{entity} not found for {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Verification code does not match")]
    Mismatch,

    #[error("Delivery failed: {0}")]
    TransportFailure(String),
}

impl CoreError {
    /// Build a [`CoreError::CooldownActive`] from its parts.
    pub fn cooldown(cooldown_info: CooldownInfo, existing_offer: Option<HistoryEntry>) -> Self {
        CoreError::CooldownActive(Box::new(CooldownDenial {
            cooldown_info,
            existing_offer,
        }))
    }
}
