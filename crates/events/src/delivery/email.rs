//! Contact notification delivery via SMTP.
//!
//! [`SmtpEmailDelivery`] wraps the `lettre` async SMTP transport. The
//! transport is built once and reused for every message.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{ContactNotifier, DeliveryError};
use crate::config::SmtpConfig;
use crate::notice::ContactNotice;

/// Sends contact notifications to the owner through an SMTP relay.
pub struct SmtpEmailDelivery {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    to_address: String,
}

impl SmtpEmailDelivery {
    /// Build the STARTTLS transport for the given relay.
    pub fn new(
        config: &SmtpConfig,
        from_address: &str,
        to_address: &str,
    ) -> Result<Self, DeliveryError> {
        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(user), Some(pass)) = (&config.user, &config.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: transport_builder.build(),
            from_address: from_address.to_string(),
            to_address: to_address.to_string(),
        })
    }
}

/// Assemble the HTML notification, replying to the sender.
fn build_message(from: &str, to: &str, notice: &ContactNotice) -> Result<Message, DeliveryError> {
    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .reply_to(notice.sender_email.parse()?)
        .subject(notice.email_subject())
        .header(ContentType::TEXT_HTML)
        .body(notice.html_body())
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

#[async_trait]
impl ContactNotifier for SmtpEmailDelivery {
    fn channel(&self) -> &'static str {
        "smtp"
    }

    async fn notify(&self, notice: &ContactNotice) -> Result<(), DeliveryError> {
        let email = build_message(&self.from_address, &self.to_address, notice)?;
        self.mailer.send(email).await?;

        tracing::info!(
            to = %self.to_address,
            message_id = notice.message_id,
            "Contact notification email sent via SMTP"
        );
        Ok(())
    }
}
