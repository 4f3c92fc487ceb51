//! Mail transport configuration.

use std::sync::Arc;

use crate::delivery::email::SmtpEmailDelivery;
use crate::delivery::http::ApiEmailDelivery;
use crate::delivery::{ContactNotifier, DeliveryError, DisabledNotifier};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default email API endpoint (Resend).
const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

/// Default sender when `MAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "Portfolio <onboarding@resend.dev>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    Api { url: String, api_key: String },
    Smtp(SmtpConfig),
}

/// Where contact notifications go and how they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Owner address receiving notifications.
    pub notify_to: String,
    pub from_address: String,
    pub transport: MailTransport,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `CONTACT_NOTIFY_TO` is unset or neither
    /// `EMAIL_API_KEY` nor `SMTP_HOST` is set; notifications are then skipped.
    ///
    /// | Variable            | Required | Default                              |
    /// |---------------------|----------|--------------------------------------|
    /// | `CONTACT_NOTIFY_TO` | yes      | --                                   |
    /// | `MAIL_FROM`         | no       | `Portfolio <onboarding@resend.dev>`  |
    /// | `EMAIL_API_KEY`     | one of   | --                                   |
    /// | `EMAIL_API_URL`     | no       | `https://api.resend.com/emails`      |
    /// | `SMTP_HOST`         | one of   | --                                   |
    /// | `SMTP_PORT`         | no       | `587`                                |
    /// | `SMTP_USER`         | no       | --                                   |
    /// | `SMTP_PASSWORD`     | no       | --                                   |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MailConfig::from_env`] with an injectable variable source.
    /// Blank values count as unset. The API transport wins when both are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notify_to = get("CONTACT_NOTIFY_TO")?;
        let from_address = get("MAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());

        let transport = if let Some(api_key) = get("EMAIL_API_KEY") {
            MailTransport::Api {
                url: get("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
                api_key,
            }
        } else {
            MailTransport::Smtp(SmtpConfig {
                host: get("SMTP_HOST")?,
                port: get("SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                user: get("SMTP_USER"),
                password: get("SMTP_PASSWORD"),
            })
        };

        Some(Self {
            notify_to,
            from_address,
            transport,
        })
    }
}

/// Build the notifier for a configuration; `None` yields [`DisabledNotifier`].
pub fn build_notifier(
    config: Option<&MailConfig>,
) -> Result<Arc<dyn ContactNotifier>, DeliveryError> {
    let Some(config) = config else {
        return Ok(Arc::new(DisabledNotifier));
    };

    let notifier: Arc<dyn ContactNotifier> = match &config.transport {
        MailTransport::Api { url, api_key } => Arc::new(ApiEmailDelivery::new(
            url,
            api_key,
            &config.from_address,
            &config.notify_to,
        )?),
        MailTransport::Smtp(smtp) => Arc::new(SmtpEmailDelivery::new(
            smtp,
            &config.from_address,
            &config.notify_to,
        )?),
    };
    Ok(notifier)
}
