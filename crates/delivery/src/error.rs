use spinwin_core::contact::ContactMethod;

/// Error type for verification-code delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// No channel is wired up for this contact method.
    #[error("No sender configured for {0}")]
    Unsupported(ContactMethod),

    /// A sender rejected the request for a reason of its own.
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}
