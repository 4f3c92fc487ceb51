//! Public contact-form submissions.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::resource::{FieldValue, Fields};

/// Subject used when the sender leaves it blank.
pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission";

/// Body of `POST /api/contact`.
///
/// Every field defaults so that a missing required field reports as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "is required"))]
    pub sender_name: String,

    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub sender_email: String,

    #[serde(default)]
    #[validate(length(max = 50, message = "is too long"))]
    pub sender_phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 300, message = "is too long"))]
    pub subject: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 10000, message = "is required"))]
    pub message: String,
}

impl ContactSubmission {
    /// Trim every field, drop blank optionals, then validate.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.sender_name = self.sender_name.trim().to_string();
        self.sender_email = self.sender_email.trim().to_string();
        self.message = self.message.trim().to_string();
        self.sender_phone = non_blank(self.sender_phone);
        self.subject = non_blank(self.subject);
        self.validate()?;
        Ok(self)
    }

    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }

    /// Columns written when the message is first persisted.
    pub fn to_fields(&self) -> Fields {
        vec![
            ("sender_name", FieldValue::text(&self.sender_name)),
            ("sender_email", FieldValue::text(&self.sender_email)),
            ("sender_phone", FieldValue::Text(self.sender_phone.clone())),
            ("subject", FieldValue::text(self.subject_or_default())),
            ("message", FieldValue::text(&self.message)),
            ("read", FieldValue::Boolean(Some(false))),
            ("replied", FieldValue::Boolean(Some(false))),
            (
                "notification_status",
                FieldValue::text(NotificationStatus::Pending.as_str()),
            ),
        ]
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Delivery state of the owner notification for one contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
    /// No mail transport is configured.
    Skipped,
}

impl NotificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Skipped => "skipped",
        }
    }
}
