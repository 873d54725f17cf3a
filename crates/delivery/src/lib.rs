//! Verification-code delivery channels.
//!
//! - [`CodeSender`] -- the capability the verifier depends on.
//! - [`EmailSender`] -- SMTP delivery via `lettre`.
//! - [`LogSmsSender`] -- SMS placeholder that logs codes.
//! - [`CodeDispatcher`] -- routes by contact method.
//! - [`RecordingSender`] -- captures codes in memory for tests.

pub mod dispatcher;
pub mod email;
pub mod error;
pub mod recording;
pub mod sms;
pub mod template;

use async_trait::async_trait;
use spinwin_core::contact::ContactMethod;

pub use dispatcher::CodeDispatcher;
pub use email::{EmailConfig, EmailSender};
pub use error::DeliveryError;
pub use recording::RecordingSender;
pub use sms::LogSmsSender;

/// Delivers a verification code to a contact.
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send_code(
        &self,
        contact: &str,
        code: &str,
        method: ContactMethod,
    ) -> Result<(), DeliveryError>;
}
