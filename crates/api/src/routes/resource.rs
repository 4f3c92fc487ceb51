//! Route factory for catalog resources.
//!
//! One [`ResourceDef`] yields the full CRUD surface. `POST /` is supplied by
//! the caller, usually [`admin_create`]:
//!
//! ```text
//! GET    /       -> list        (public, or admin for admin-read resources)
//! POST   /       -> create      (admin)
//! GET    /{id}   -> get_one     (public, or admin for admin-read resources)
//! PUT    /{id}   -> update      (admin)
//! DELETE /{id}   -> delete      (admin)
//! ```

use axum::extract::{Path, State};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use folio_core::resource::{ReadAccess, ResourceDef};
use serde_json::Value;

use crate::handlers::resource;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Admin-only generic create for `def`.
pub fn admin_create(def: &'static ResourceDef) -> MethodRouter<AppState> {
    post(
        move |RequireAdmin(admin): RequireAdmin,
              State(state): State<AppState>,
              Json(body): Json<Value>| resource::create(def, admin, state, body),
    )
}

/// CRUD router for `def`; `create` serves `POST /`.
pub fn router(def: &'static ResourceDef, create: MethodRouter<AppState>) -> Router<AppState> {
    let (list, get_one) = match def.read_access {
        ReadAccess::Public => (
            get(move |State(state): State<AppState>| resource::list(def, state)),
            get(
                move |State(state): State<AppState>, Path(id): Path<String>| {
                    resource::get_one(def, state, id)
                },
            ),
        ),
        ReadAccess::Admin => (
            get(move |_: RequireAdmin, State(state): State<AppState>| {
                resource::list(def, state)
            }),
            get(
                move |_: RequireAdmin, State(state): State<AppState>, Path(id): Path<String>| {
                    resource::get_one(def, state, id)
                },
            ),
        ),
    };

    let item = get_one
        .put(
            move |RequireAdmin(admin): RequireAdmin,
                  State(state): State<AppState>,
                  Path(id): Path<String>,
                  Json(body): Json<Value>| {
                resource::update(def, admin, state, id, body)
            },
        )
        .delete(
            move |RequireAdmin(admin): RequireAdmin,
                  State(state): State<AppState>,
                  Path(id): Path<String>| resource::delete(def, admin, state, id),
        );

    Router::new()
        .route("/", list.merge(create))
        .route("/{id}", item)
}
