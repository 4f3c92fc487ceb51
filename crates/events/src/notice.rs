//! Notification content for a new contact message.

use chrono::Utc;
use folio_core::contact::ContactSubmission;
use folio_core::types::{DbId, Timestamp};

/// A persisted contact message, as reported to the site owner.
#[derive(Debug, Clone)]
pub struct ContactNotice {
    pub message_id: DbId,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub received_at: Timestamp,
}

impl ContactNotice {
    pub fn new(message_id: DbId, submission: &ContactSubmission) -> Self {
        Self {
            message_id,
            sender_name: submission.sender_name.clone(),
            sender_email: submission.sender_email.clone(),
            sender_phone: submission.sender_phone.clone(),
            subject: submission.subject_or_default().to_string(),
            message: submission.message.clone(),
            received_at: Utc::now(),
        }
    }

    pub fn email_subject(&self) -> String {
        format!("[Portfolio] {} (from {})", self.subject, self.sender_name)
    }

    /// HTML body; every sender-supplied value is escaped.
    pub fn html_body(&self) -> String {
        let phone = self
            .sender_phone
            .as_deref()
            .map(|p| format!("<p><strong>Phone:</strong> {}</p>", escape_html(p)))
            .unwrap_or_default();

        format!(
            "<h2>New message from your portfolio</h2>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p>\
             {phone}\
             <p><strong>Subject:</strong> {subject}</p>\
             <p><strong>Message:</strong></p>\
             <p>{message}</p>\
             <hr><p><small>Message #{id} received {received}</small></p>",
            name = escape_html(&self.sender_name),
            email = escape_html(&self.sender_email),
            subject = escape_html(&self.subject),
            message = escape_html(&self.message).replace('\n', "<br>"),
            id = self.message_id,
            received = self.received_at.format("%Y-%m-%d %H:%M UTC"),
        )
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
