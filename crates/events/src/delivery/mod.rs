//! Delivery channels for contact notifications.
//!
//! [`ContactNotifier`] is the seam the dispatcher talks to. Production uses
//! [`http::ApiEmailDelivery`] (transactional email HTTP API) or
//! [`email::SmtpEmailDelivery`]; [`DisabledNotifier`] stands in when no mail
//! transport is configured.

use async_trait::async_trait;

use crate::notice::ContactNotice;

pub mod email;
pub mod http;

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The email API answered with a non-2xx status.
    #[error("Email API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

#[async_trait]
pub trait ContactNotifier: Send + Sync {
    /// Short channel name for logs (`"api"`, `"smtp"`, ...).
    fn channel(&self) -> &'static str;

    /// `false` when notifications are intentionally not sent.
    fn is_enabled(&self) -> bool {
        true
    }

    async fn notify(&self, notice: &ContactNotice) -> Result<(), DeliveryError>;
}

/// Used when no mail transport is configured; never sends anything.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl ContactNotifier for DisabledNotifier {
    fn channel(&self) -> &'static str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn notify(&self, _notice: &ContactNotice) -> Result<(), DeliveryError> {
        Ok(())
    }
}
