//! Shared response bodies for API handlers.

use folio_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }` body returned by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement returned to the contact form once the message is stored.
#[derive(Debug, Serialize)]
pub struct ContactAck {
    pub success: bool,
    pub message: &'static str,
    pub id: DbId,
}
