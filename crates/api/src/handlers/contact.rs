//! Public contact form submission.
//!
//! The owner notification runs on a detached task that graceful shutdown
//! does not wait for. If the server stops before it finishes, the message
//! keeps `notification_status = 'pending'` and no email is retried.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::catalog::CONTACT_MESSAGES;
use folio_core::contact::ContactSubmission;
use folio_core::error::CoreError;
use folio_events::{spawn_contact_notification, ContactNotice};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::ContactAck;
use crate::state::AppState;

/// POST /api/contact
///
/// Validates and stores the message, then hands the owner notification to a
/// background task. The response never depends on delivery.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<ContactAck>)> {
    let submission: ContactSubmission = serde_json::from_value(body)
        .map_err(|e| CoreError::Validation(format!("Invalid contact form: {e}")))?;
    let submission = submission.normalized()?;

    let row = state
        .store
        .insert(&CONTACT_MESSAGES, &submission.to_fields())
        .await?;
    let id = row
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::InternalError("Stored contact message has no id".into()))?;

    tracing::info!(message_id = id, "Contact message stored");

    spawn_contact_notification(
        Arc::clone(&state.store),
        Arc::clone(&state.notifier),
        ContactNotice::new(id, &submission),
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactAck {
            success: true,
            message: "Message sent successfully",
            id,
        }),
    ))
}
