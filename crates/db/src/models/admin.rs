//! Admin account model.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `admin_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminUser {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new admin. `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
}
