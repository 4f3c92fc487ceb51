use std::sync::Arc;

use folio_db::Store;
use folio_events::ContactNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (Postgres in production, in-memory in tests).
    pub store: Arc<dyn Store>,
    /// Delivery channel for contact notifications.
    pub notifier: Arc<dyn ContactNotifier>,
    pub config: Arc<ServerConfig>,
}
