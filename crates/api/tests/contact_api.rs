//! HTTP-level tests for contact ingestion and the admin contact inbox.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, build_test_app_with_notifier, get, get_auth,
    post_json, put_json, put_json_auth,
};
use folio_core::catalog::CONTACT_MESSAGES;
use folio_db::{MemoryStore, ResourceStore};
use folio_events::{ContactNotice, ContactNotifier, DeliveryError};
use serde_json::json;
use tokio::sync::Mutex;

/// Simulates the email API being down.
struct EmailApiDown;

#[async_trait]
impl ContactNotifier for EmailApiDown {
    fn channel(&self) -> &'static str {
        "test"
    }

    async fn notify(&self, _notice: &ContactNotice) -> Result<(), DeliveryError> {
        Err(DeliveryError::HttpStatus {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}

/// Records every notice it is asked to deliver.
#[derive(Default)]
struct Recording {
    sent: Mutex<Vec<ContactNotice>>,
}

#[async_trait]
impl ContactNotifier for Recording {
    fn channel(&self) -> &'static str {
        "test"
    }

    async fn notify(&self, notice: &ContactNotice) -> Result<(), DeliveryError> {
        self.sent.lock().await.push(notice.clone());
        Ok(())
    }
}

fn jane() -> serde_json::Value {
    json!({ "sender_name": "Jane", "sender_email": "jane@x.com", "message": "Hi" })
}

/// Poll until the background dispatcher records `expected`.
async fn wait_for_status(store: &MemoryStore, id: i64, expected: &str) {
    for _ in 0..200 {
        let row = store.find(&CONTACT_MESSAGES, id).await.unwrap().unwrap();
        if row["notification_status"] == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("notification_status never became {expected}");
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_is_acknowledged_and_persisted() {
    let notifier = Arc::new(Recording::default());
    let t = build_test_app_with_notifier(notifier.clone());

    let response = post_json(t.router(), "/api/contact", jane()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let ack = body_json(response).await;
    assert_eq!(ack["success"], true);
    let id = ack["id"].as_i64().unwrap();

    wait_for_status(&t.store, id, "sent").await;

    let row = t.store.find(&CONTACT_MESSAGES, id).await.unwrap().unwrap();
    assert_eq!(row["sender_name"], "Jane");
    assert_eq!(row["subject"], "New Contact Form Submission");
    assert_eq!(row["read"], false);
    assert_eq!(row["replied"], false);
    assert!(row["sender_phone"].is_null());

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message_id, id);
    assert_eq!(sent[0].sender_email, "jane@x.com");
}

#[tokio::test]
async fn submission_succeeds_when_email_api_is_down() {
    let t = build_test_app_with_notifier(Arc::new(EmailApiDown));

    let response = post_json(t.router(), "/api/contact", jane()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    wait_for_status(&t.store, id, "failed").await;
    assert_eq!(t.store.row_count("contact_messages").await, 1);
}

#[tokio::test]
async fn submission_without_mail_config_is_marked_skipped() {
    let t = build_test_app();

    let response = post_json(t.router(), "/api/contact", jane()).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    wait_for_status(&t.store, id, "skipped").await;
}

#[tokio::test]
async fn missing_message_is_rejected_without_a_row() {
    let t = build_test_app();

    let response = post_json(
        t.router(),
        "/api/contact",
        json!({ "sender_name": "Jane", "sender_email": "jane@x.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "message");
    assert_eq!(t.store.row_count("contact_messages").await, 0);
}

#[tokio::test]
async fn whitespace_only_fields_count_as_missing() {
    let t = build_test_app();

    let response = post_json(
        t.router(),
        "/api/contact",
        json!({ "sender_name": "   ", "sender_email": "jane@x.com", "message": "Hi" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(t.store.row_count("contact_messages").await, 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let t = build_test_app();

    let mut body = jane();
    body["sender_email"] = json!("jane-at-x");
    let response = post_json(t.router(), "/api/contact", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(t.store.row_count("contact_messages").await, 0);
}

#[tokio::test]
async fn store_failure_on_submit_is_a_500() {
    let t = build_test_app();
    t.store.set_failure(Some("disk full")).await;

    let response = post_json(t.router(), "/api/contact", jane()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "store unavailable: disk full");
}

// ---------------------------------------------------------------------------
// Admin inbox
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reading_messages_requires_a_token() {
    let t = build_test_app();
    let id = body_json(post_json(t.router(), "/api/contact", jane()).await).await["id"].clone();

    let response = get(t.router(), "/api/contact").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(t.router(), &format!("/api/contact/{id}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(t.router(), "/api/contact", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id);
}

#[tokio::test]
async fn admin_marks_message_read_and_replied() {
    let t = build_test_app();
    let id = body_json(post_json(t.router(), "/api/contact", jane()).await).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/contact/{id}");

    let response = put_json(t.router(), &uri, json!({ "read": true, "replied": false })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = put_json_auth(
        t.router(),
        &uri,
        json!({ "read": true, "replied": true, "message": "tampered" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let row = body_json(response).await;

    assert_eq!(row["read"], true);
    assert_eq!(row["replied"], true);
    // Only the flags are editable.
    assert_eq!(row["message"], "Hi");
}

#[tokio::test]
async fn flag_update_requires_both_flags() {
    let t = build_test_app();
    let id = body_json(post_json(t.router(), "/api/contact", jane()).await).await["id"]
        .as_i64()
        .unwrap();

    let response = put_json_auth(
        t.router(),
        &format!("/api/contact/{id}"),
        json!({ "read": true }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
