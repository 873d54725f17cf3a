//! Verification-code delivery via SMTP.
//!
//! [`EmailSender`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and the sender only logs codes.

use async_trait::async_trait;
use spinwin_core::contact::ContactMethod;

use crate::error::DeliveryError;
use crate::template::{self, EmailContent};
use crate::CodeSender;

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@waffleforever.local";

/// Default display name on outgoing mail.
const DEFAULT_FROM_NAME: &str = "Waffle Forever";

/// Configuration for the SMTP delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Display name paired with `from_address`.
    pub from_name: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable         | Required | Default                        |
    /// |------------------|----------|--------------------------------|
    /// | `SMTP_HOST`      | yes      | -                               |
    /// | `SMTP_PORT`      | no       | `587`                          |
    /// | `SMTP_FROM`      | no       | `noreply@waffleforever.local`  |
    /// | `SMTP_FROM_NAME` | no       | `Waffle Forever`               |
    /// | `SMTP_USER`      | no       | -                               |
    /// | `SMTP_PASSWORD`  | no       | -                               |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| DEFAULT_FROM_NAME.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailSender
// ---------------------------------------------------------------------------

/// Sends verification codes by email.
///
/// Without an [`EmailConfig`] the code is written to the log instead, which
/// keeps local development working without an SMTP relay. With
/// `log_on_failure` set, SMTP errors are logged and swallowed the same way.
pub struct EmailSender {
    config: Option<EmailConfig>,
    log_on_failure: bool,
}

impl EmailSender {
    pub fn new(config: Option<EmailConfig>, log_on_failure: bool) -> Self {
        Self {
            config,
            log_on_failure,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn send_smtp(
        config: &EmailConfig,
        to_email: &str,
        content: EmailContent,
    ) -> Result<(), DeliveryError> {
        use lettre::{
            message::{Mailbox, MultiPart},
            transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let from = Mailbox::new(Some(config.from_name.clone()), config.from_address.parse()?);

        let email = Message::builder()
            .from(from)
            .to(to_email.parse()?)
            .subject(content.subject)
            .multipart(MultiPart::alternative_plain_html(content.text, content.html))
            .map_err(|e| DeliveryError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl CodeSender for EmailSender {
    async fn send_code(
        &self,
        contact: &str,
        code: &str,
        method: ContactMethod,
    ) -> Result<(), DeliveryError> {
        if method != ContactMethod::Email {
            return Err(DeliveryError::Unsupported(method));
        }

        let Some(config) = &self.config else {
            tracing::info!(to = contact, code, "SMTP not configured; verification code logged");
            return Ok(());
        };

        match Self::send_smtp(config, contact, template::otp_email(code, &config.from_name)).await {
            Ok(()) => {
                tracing::info!(to = contact, "Verification email sent");
                Ok(())
            }
            Err(e) if self.log_on_failure => {
                tracing::warn!(to = contact, code, error = %e, "Email delivery failed; code logged instead");
                Ok(())
            }
            Err(e) => {
                tracing::error!(to = contact, error = %e, "Email delivery failed");
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
