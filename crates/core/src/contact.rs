//! Contact methods and contact-format validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum number of digits a phone contact must carry.
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid regex"));

/// Channel through which a verification code is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    /// Parse a method name as sent by clients.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "email" => Ok(ContactMethod::Email),
            "phone" => Ok(ContactMethod::Phone),
            other => Err(CoreError::InvalidInput(format!(
                "Unknown contact method '{other}'. Expected 'email' or 'phone'"
            ))),
        }
    }
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim a raw contact and reject empty values.
pub fn normalize_contact(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput("Contact is required".into()));
    }
    Ok(trimmed.to_string())
}

pub fn is_valid_email(contact: &str) -> bool {
    EMAIL_RE.is_match(contact)
}

/// Optional leading `+`, then digits, spaces, dashes and parentheses, with
/// at least [`MIN_PHONE_DIGITS`] digits overall.
pub fn is_valid_phone(contact: &str) -> bool {
    PHONE_RE.is_match(contact)
        && contact.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Validate `contact` against the format expected for `method`.
pub fn validate_contact(contact: &str, method: ContactMethod) -> Result<(), CoreError> {
    let ok = match method {
        ContactMethod::Email => is_valid_email(contact),
        ContactMethod::Phone => is_valid_phone(contact),
    };
    if ok {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!("Invalid {method} format")))
    }
}
