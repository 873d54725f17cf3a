//! Routes each code to the sender for its contact method.

use std::sync::Arc;

use async_trait::async_trait;
use spinwin_core::contact::ContactMethod;

use crate::error::DeliveryError;
use crate::CodeSender;

/// A [`CodeSender`] that fans out by [`ContactMethod`].
pub struct CodeDispatcher {
    email: Arc<dyn CodeSender>,
    sms: Arc<dyn CodeSender>,
}

impl CodeDispatcher {
    pub fn new(email: Arc<dyn CodeSender>, sms: Arc<dyn CodeSender>) -> Self {
        Self { email, sms }
    }
}

#[async_trait]
impl CodeSender for CodeDispatcher {
    async fn send_code(
        &self,
        contact: &str,
        code: &str,
        method: ContactMethod,
    ) -> Result<(), DeliveryError> {
        let sender = match method {
            ContactMethod::Email => &self.email,
            ContactMethod::Phone => &self.sms,
        };
        sender.send_code(contact, code, method).await
    }
}
