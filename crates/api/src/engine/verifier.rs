//! Contact ownership verification via one-time codes.

use spinwin_core::contact::{normalize_contact, validate_contact, ContactMethod};
use spinwin_core::error::CoreError;
use spinwin_core::otp;
use spinwin_core::random::RandomSource;
use spinwin_delivery::CodeSender;
use spinwin_store::repositories::OtpRepo;
use spinwin_store::KvStore;

use crate::config::OtpChannels;
use crate::engine::cooldown::CooldownTracker;
use crate::error::AppResult;

/// A code that was stored and handed to the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// The normalized contact the code belongs to.
    pub contact: String,
    pub code: String,
}

pub struct ContactVerifier<'a> {
    store: &'a dyn KvStore,
    sender: &'a dyn CodeSender,
    rng: &'a dyn RandomSource,
    cooldowns: CooldownTracker<'a>,
    channels: OtpChannels,
}

impl<'a> ContactVerifier<'a> {
    pub fn new(
        store: &'a dyn KvStore,
        sender: &'a dyn CodeSender,
        rng: &'a dyn RandomSource,
        cooldowns: CooldownTracker<'a>,
        channels: OtpChannels,
    ) -> Self {
        Self {
            store,
            sender,
            rng,
            cooldowns,
            channels,
        }
    }

    /// Issue a fresh code for `contact` and dispatch it.
    ///
    /// Replaces any pending code. Contacts still cooling down are refused
    /// before a code is generated. A failed dispatch leaves the stored code
    /// in place and surfaces as [`CoreError::TransportFailure`].
    pub async fn request_code(&self, contact: &str, method: ContactMethod) -> AppResult<IssuedCode> {
        let contact = normalize_contact(contact)?;
        if !self.channels.is_enabled(method) {
            return Err(CoreError::InvalidInput(format!(
                "Verification by {method} is not enabled"
            ))
            .into());
        }
        validate_contact(&contact, method)?;
        self.cooldowns.ensure_eligible(&contact).await?;

        let code = otp::generate_code(self.rng);
        OtpRepo::put(self.store, &contact, &code).await?;

        self.sender
            .send_code(&contact, &code, method)
            .await
            .map_err(|e| CoreError::TransportFailure(e.to_string()))?;

        tracing::info!(contact = %contact, method = %method, "Verification code issued");
        Ok(IssuedCode { contact, code })
    }

    /// Check `code` against the pending one and consume it on a match.
    ///
    /// A verified contact that is still cooling down gets
    /// [`CoreError::CooldownActive`]; the code is spent either way.
    pub async fn verify_code(&self, contact: &str, code: &str) -> AppResult<()> {
        let contact = normalize_contact(contact)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(CoreError::InvalidInput("Verification code is required".into()).into());
        }
        if !otp::is_well_formed(code) {
            return Err(CoreError::InvalidInput("Verification code must be 6 digits".into()).into());
        }

        let stored = OtpRepo::find(self.store, &contact).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Verification code",
                key: contact.clone(),
            }
        })?;
        if stored != code {
            tracing::debug!(contact = %contact, "Verification code mismatch");
            return Err(CoreError::Mismatch.into());
        }

        OtpRepo::delete(self.store, &contact).await?;
        tracing::info!(contact = %contact, "Contact verified");

        self.cooldowns.ensure_eligible(&contact).await
    }
}
