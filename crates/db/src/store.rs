//! Store traits.
//!
//! Handlers receive an `Arc<dyn Store>` through application state instead of
//! reaching for a global connection, so tests can swap in [`crate::MemoryStore`].

use async_trait::async_trait;
use folio_core::resource::{FieldValue, ResourceDef};
use folio_core::types::{DbId, Record};

use crate::models::admin::{AdminUser, CreateAdmin};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("duplicate value for {0}")]
    Duplicate(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-statement CRUD over the table named by a [`ResourceDef`].
///
/// Every method is one statement; there are no multi-statement transactions
/// and concurrent updates to the same row are last-write-wins.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// All rows, sorted by `def.order_by` descending (NULLs last, then `id` descending).
    async fn list(&self, def: &ResourceDef) -> StoreResult<Vec<Record>>;

    async fn find(&self, def: &ResourceDef, id: DbId) -> StoreResult<Option<Record>>;

    /// Insert a row; `id`, `created_at` and `updated_at` are assigned by the store.
    async fn insert(
        &self,
        def: &ResourceDef,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Record>;

    /// Overwrite the given columns and advance `updated_at`.
    ///
    /// Returns `None` when no row has this id.
    async fn update(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Option<Record>>;

    /// Overwrite the given columns without advancing `updated_at`.
    ///
    /// For bookkeeping the system does on its own rows (notification
    /// outcomes), which must not look like an admin edit. Returns whether a
    /// row matched.
    async fn annotate(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<bool>;

    /// Returns whether a row was removed.
    async fn delete(&self, def: &ResourceDef, id: DbId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Admin account lookups used by login and startup bootstrap.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminUser>>;

    async fn create_admin(&self, input: &CreateAdmin) -> StoreResult<AdminUser>;
}

/// Everything the API needs from persistence.
pub trait Store: ResourceStore + AdminStore {}

impl<T: ResourceStore + AdminStore> Store for T {}
