//! SMS channel.
//!
//! No SMS gateway is wired up; codes are written to the log so phone
//! verification can be exercised end to end in development.

use async_trait::async_trait;
use spinwin_core::contact::ContactMethod;

use crate::error::DeliveryError;
use crate::CodeSender;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSmsSender;

#[async_trait]
impl CodeSender for LogSmsSender {
    async fn send_code(
        &self,
        contact: &str,
        code: &str,
        method: ContactMethod,
    ) -> Result<(), DeliveryError> {
        if method != ContactMethod::Phone {
            return Err(DeliveryError::Unsupported(method));
        }
        tracing::info!(to = contact, code, "SMS gateway not configured; verification code logged");
        Ok(())
    }
}
