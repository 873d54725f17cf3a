//! In-memory sender that records what it was asked to send.
//!
//! Used by integration tests to read back the code a user "received".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use spinwin_core::contact::ContactMethod;

use crate::error::DeliveryError;
use crate::CodeSender;

/// One recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub contact: String,
    pub code: String,
    pub method: ContactMethod,
}

#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentCode>>,
    fail: AtomicBool,
}

impl RecordingSender {
    /// Make subsequent sends fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Most recent code sent to `contact`.
    pub fn last_code(&self, contact: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|s| s.contact == contact)
            .map(|s| s.code)
    }
}

#[async_trait]
impl CodeSender for RecordingSender {
    async fn send_code(
        &self,
        contact: &str,
        code: &str,
        method: ContactMethod,
    ) -> Result<(), DeliveryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected("recording sender set to fail".into()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentCode {
                contact: contact.to_string(),
                code: code.to_string(),
                method,
            });
        Ok(())
    }
}
