//! Generic CRUD handlers shared by every catalog resource.
//!
//! Each handler takes the [`ResourceDef`] it serves as its first argument;
//! the route factory in [`crate::routes::resource`] closes over it.

use axum::http::StatusCode;
use axum::Json;
use folio_core::resource::ResourceDef;
use folio_core::types::Record;
use folio_core::validation::{parse_id, validate_payload};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /{resource} -- all rows in the resource's display order.
pub async fn list(def: &'static ResourceDef, state: AppState) -> AppResult<Json<Vec<Record>>> {
    let rows = state.store.list(def).await?;
    Ok(Json(rows))
}

/// GET /{resource}/{id} -- the row, or `{}` when no row has this id.
pub async fn get_one(
    def: &'static ResourceDef,
    state: AppState,
    raw_id: String,
) -> AppResult<Json<Record>> {
    let id = parse_id(&raw_id)?;
    let row = state.store.find(def, id).await?;
    Ok(Json(row.unwrap_or_default()))
}

/// POST /{resource} -- validate, insert, return the stored row.
pub async fn create(
    def: &'static ResourceDef,
    admin: AuthUser,
    state: AppState,
    body: Value,
) -> AppResult<(StatusCode, Json<Record>)> {
    let fields = validate_payload(def, &body)?;
    let row = state.store.insert(def, &fields).await?;

    tracing::info!(
        entity = def.entity,
        id = ?row.get("id"),
        admin_id = admin.admin_id,
        "Resource created"
    );
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /{resource}/{id} -- full replacement of the editable columns.
///
/// Returns `{}` when no row has this id.
pub async fn update(
    def: &'static ResourceDef,
    admin: AuthUser,
    state: AppState,
    raw_id: String,
    body: Value,
) -> AppResult<Json<Record>> {
    let id = parse_id(&raw_id)?;
    let fields = validate_payload(def, &body)?;

    match state.store.update(def, id, &fields).await? {
        Some(row) => {
            tracing::info!(entity = def.entity, id, admin_id = admin.admin_id, "Resource updated");
            Ok(Json(row))
        }
        None => {
            tracing::debug!(entity = def.entity, id, "Update matched no row");
            Ok(Json(Record::new()))
        }
    }
}

/// DELETE /{resource}/{id} -- always acknowledges, whether or not a row existed.
pub async fn delete(
    def: &'static ResourceDef,
    admin: AuthUser,
    state: AppState,
    raw_id: String,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&raw_id)?;
    let removed = state.store.delete(def, id).await?;

    tracing::info!(
        entity = def.entity,
        id,
        removed,
        admin_id = admin.admin_id,
        "Resource delete"
    );
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        def.entity
    ))))
}
