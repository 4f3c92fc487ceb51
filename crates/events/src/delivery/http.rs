//! Contact notification delivery via a transactional email HTTP API.
//!
//! [`ApiEmailDelivery`] posts `{from, to, subject, html, reply_to}` with a
//! bearer key (the Resend request shape). One attempt per message: a failed
//! notification is recorded, not retried.

use std::time::Duration;

use async_trait::async_trait;

use super::{ContactNotifier, DeliveryError};
use crate::notice::ContactNotice;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers contact notifications through an email provider's REST API.
pub struct ApiEmailDelivery {
    client: reqwest::Client,
    url: String,
    api_key: String,
    from_address: String,
    to_address: String,
}

impl ApiEmailDelivery {
    /// Create a delivery service with a pre-configured HTTP client.
    pub fn new(
        url: &str,
        api_key: &str,
        from_address: &str,
        to_address: &str,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
            from_address: from_address.to_string(),
            to_address: to_address.to_string(),
        })
    }

    fn payload(&self, notice: &ContactNotice) -> serde_json::Value {
        serde_json::json!({
            "from": self.from_address,
            "to": [self.to_address],
            "subject": notice.email_subject(),
            "html": notice.html_body(),
            "reply_to": notice.sender_email,
        })
    }
}

#[async_trait]
impl ContactNotifier for ApiEmailDelivery {
    fn channel(&self) -> &'static str {
        "api"
    }

    async fn notify(&self, notice: &ContactNotice) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(notice))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            to = %self.to_address,
            message_id = notice.message_id,
            "Contact notification email sent via API"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn notice() -> ContactNotice {
        ContactNotice {
            message_id: 3,
            sender_name: "Jane".into(),
            sender_email: "jane@x.com".into(),
            sender_phone: None,
            subject: "Hi".into(),
            message: "Hello".into(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn payload_addresses_owner_and_replies_to_sender() {
        let delivery =
            ApiEmailDelivery::new("http://localhost/emails", "key", "site@x.com", "me@x.com")
                .unwrap();
        let payload = delivery.payload(&notice());
        assert_eq!(payload["from"], "site@x.com");
        assert_eq!(payload["to"], serde_json::json!(["me@x.com"]));
        assert_eq!(payload["reply_to"], "jane@x.com");
        assert!(payload["html"].as_str().unwrap().contains("Hello"));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_request_error() {
        // Port 1 on loopback refuses connections.
        let delivery =
            ApiEmailDelivery::new("http://127.0.0.1:1/emails", "key", "site@x.com", "me@x.com")
                .unwrap();
        let err = delivery.notify(&notice()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Request(_)), "got {err}");
    }
}
