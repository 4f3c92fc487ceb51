//! Best-effort delivery of contact notifications.
//!
//! The contact message is already persisted when dispatch starts. Delivery
//! runs on its own task; its outcome is logged and written to the message's
//! `notification_status` column, and never reaches the submitter.
//!
//! The outcome is written with [`ResourceStore::annotate`], so recording it
//! does not move the message's `updated_at`. A task still running when the
//! runtime shuts down is dropped and the message stays `pending`.

use std::sync::Arc;

use folio_core::catalog::CONTACT_MESSAGES;
use folio_core::contact::NotificationStatus;
use folio_core::resource::FieldValue;
use folio_db::ResourceStore;
use tokio::task::JoinHandle;

use crate::delivery::ContactNotifier;
use crate::notice::ContactNotice;

/// Deliver `notice` in the background. The handle may be dropped.
pub fn spawn_contact_notification<S>(
    store: Arc<S>,
    notifier: Arc<dyn ContactNotifier>,
    notice: ContactNotice,
) -> JoinHandle<NotificationStatus>
where
    S: ResourceStore + ?Sized + 'static,
{
    tokio::spawn(async move { deliver_and_record(store.as_ref(), notifier.as_ref(), &notice).await })
}

/// Deliver one notice and record the outcome on the stored message.
pub async fn deliver_and_record<S>(
    store: &S,
    notifier: &dyn ContactNotifier,
    notice: &ContactNotice,
) -> NotificationStatus
where
    S: ResourceStore + ?Sized,
{
    let channel = notifier.channel();

    let status = if !notifier.is_enabled() {
        tracing::debug!(
            message_id = notice.message_id,
            "Mail not configured, skipping contact notification"
        );
        NotificationStatus::Skipped
    } else {
        match notifier.notify(notice).await {
            Ok(()) => NotificationStatus::Sent,
            Err(e) => {
                tracing::warn!(
                    message_id = notice.message_id,
                    channel,
                    error = %e,
                    "Contact notification failed"
                );
                NotificationStatus::Failed
            }
        }
    };

    let fields = [("notification_status", FieldValue::text(status.as_str()))];
    match store.annotate(&CONTACT_MESSAGES, notice.message_id, &fields).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!(
            message_id = notice.message_id,
            "Contact message deleted before notification outcome was recorded"
        ),
        Err(e) => tracing::warn!(
            message_id = notice.message_id,
            error = %e,
            "Failed to record contact notification outcome"
        ),
    }

    tracing::info!(
        message_id = notice.message_id,
        channel,
        status = status.as_str(),
        "Contact notification processed"
    );
    status
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use folio_core::contact::ContactSubmission;
    use folio_db::MemoryStore;

    use super::*;
    use crate::delivery::{DeliveryError, DisabledNotifier};

    struct AlwaysOk;

    #[async_trait]
    impl ContactNotifier for AlwaysOk {
        fn channel(&self) -> &'static str {
            "test"
        }

        async fn notify(&self, _notice: &ContactNotice) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    struct ApiDown;

    #[async_trait]
    impl ContactNotifier for ApiDown {
        fn channel(&self) -> &'static str {
            "test"
        }

        async fn notify(&self, _notice: &ContactNotice) -> Result<(), DeliveryError> {
            Err(DeliveryError::HttpStatus {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    async fn stored_notice(store: &MemoryStore) -> ContactNotice {
        let submission = ContactSubmission {
            sender_name: "Jane".into(),
            sender_email: "jane@x.com".into(),
            message: "Hi".into(),
            ..Default::default()
        };
        let record = store
            .insert(&CONTACT_MESSAGES, &submission.to_fields())
            .await
            .unwrap();
        ContactNotice::new(record["id"].as_i64().unwrap(), &submission)
    }

    async fn status_of(store: &MemoryStore, id: i64) -> String {
        let record = store.find(&CONTACT_MESSAGES, id).await.unwrap().unwrap();
        record["notification_status"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn successful_delivery_is_recorded_as_sent() {
        let store = MemoryStore::new();
        let notice = stored_notice(&store).await;

        let status = deliver_and_record(&store, &AlwaysOk, &notice).await;

        assert_eq!(status, NotificationStatus::Sent);
        assert_eq!(status_of(&store, notice.message_id).await, "sent");
    }

    #[tokio::test]
    async fn recording_outcome_keeps_updated_at() {
        let store = MemoryStore::new();
        let notice = stored_notice(&store).await;
        let before = store
            .find(&CONTACT_MESSAGES, notice.message_id)
            .await
            .unwrap()
            .unwrap();

        deliver_and_record(&store, &AlwaysOk, &notice).await;

        let after = store
            .find(&CONTACT_MESSAGES, notice.message_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after["notification_status"], "sent");
        assert_eq!(after["updated_at"], before["updated_at"]);
    }

    #[tokio::test]
    async fn failed_delivery_keeps_message() {
        let store = Arc::new(MemoryStore::new());
        let notice = stored_notice(&store).await;
        let id = notice.message_id;

        let status = spawn_contact_notification(Arc::clone(&store), Arc::new(ApiDown), notice)
            .await
            .unwrap();

        assert_eq!(status, NotificationStatus::Failed);
        assert_eq!(store.row_count("contact_messages").await, 1);
        assert_eq!(status_of(&store, id).await, "failed");
    }

    #[tokio::test]
    async fn disabled_notifier_is_skipped() {
        let store = MemoryStore::new();
        let notice = stored_notice(&store).await;

        let status = deliver_and_record(&store, &DisabledNotifier, &notice).await;

        assert_eq!(status, NotificationStatus::Skipped);
        assert_eq!(status_of(&store, notice.message_id).await, "skipped");
    }

    #[tokio::test]
    async fn message_deleted_mid_flight_is_not_an_error() {
        let store = MemoryStore::new();
        let notice = stored_notice(&store).await;
        store.delete(&CONTACT_MESSAGES, notice.message_id).await.unwrap();

        let status = deliver_and_record(&store, &AlwaysOk, &notice).await;

        assert_eq!(status, NotificationStatus::Sent);
        assert_eq!(store.row_count("contact_messages").await, 0);
    }
}
