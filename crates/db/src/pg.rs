//! PostgreSQL store.
//!
//! Rows are returned as `to_jsonb(t)` so one query path serves every table.
//! Identifiers come from the static catalog and are always double-quoted;
//! values are always bound as typed parameters.

use async_trait::async_trait;
use folio_core::resource::{FieldValue, ResourceDef};
use folio_core::types::{DbId, Record};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::types::Json;
use sqlx::Postgres;

use crate::models::admin::{AdminUser, CreateAdmin};
use crate::store::{AdminStore, ResourceStore, StoreError, StoreResult};
use crate::DbPool;

/// Column list for `admin_users` queries.
const ADMIN_COLUMNS: &str = "id, username, password_hash, created_at, updated_at";

type RecordQuery<'q> = QueryScalar<'q, Postgres, Json<Record>, PgArguments>;

/// [`ResourceStore`] and [`AdminStore`] backed by a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn list(&self, def: &ResourceDef) -> StoreResult<Vec<Record>> {
        let query = select_all_sql(def);
        let rows = sqlx::query_scalar::<_, Json<Record>>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    async fn find(&self, def: &ResourceDef, id: DbId) -> StoreResult<Option<Record>> {
        let query = select_one_sql(def);
        let row = sqlx::query_scalar::<_, Json<Record>>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(r)| r))
    }

    async fn insert(
        &self,
        def: &ResourceDef,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Record> {
        let query = insert_sql(def, fields);
        let mut q = sqlx::query_scalar::<_, Json<Record>>(&query);
        for (_, value) in fields {
            q = bind_value(q, value);
        }
        let Json(record) = q.fetch_one(&self.pool).await?;
        Ok(record)
    }

    async fn update(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Option<Record>> {
        let query = update_sql(def, fields, Touch::UpdatedAt);
        let mut q = sqlx::query_scalar::<_, Json<Record>>(&query).bind(id);
        for (_, value) in fields {
            q = bind_value(q, value);
        }
        let row = q.fetch_optional(&self.pool).await?;
        Ok(row.map(|Json(r)| r))
    }

    async fn annotate(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<bool> {
        let query = update_sql(def, fields, Touch::Nothing);
        let mut q = sqlx::query_scalar::<_, Json<Record>>(&query).bind(id);
        for (_, value) in fields {
            q = bind_value(q, value);
        }
        Ok(q.fetch_optional(&self.pool).await?.is_some())
    }

    async fn delete(&self, def: &ResourceDef, id: DbId) -> StoreResult<bool> {
        let query = format!("DELETE FROM \"{}\" WHERE id = $1", def.table);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminUser>> {
        let query = format!("SELECT {ADMIN_COLUMNS} FROM admin_users WHERE username = $1");
        let admin = sqlx::query_as::<_, AdminUser>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn create_admin(&self, input: &CreateAdmin) -> StoreResult<AdminUser> {
        let query = format!(
            "INSERT INTO admin_users (username, password_hash) \
             VALUES ($1, $2) \
             RETURNING {ADMIN_COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::Duplicate(format!("admin_users.username '{}'", input.username))
                }
                _ => StoreError::Database(e),
            })
    }
}

fn bind_value<'q>(query: RecordQuery<'q>, value: &FieldValue) -> RecordQuery<'q> {
    match value {
        FieldValue::Text(v) => query.bind(v.clone()),
        FieldValue::Integer(v) => query.bind(*v),
        FieldValue::Boolean(v) => query.bind(*v),
        FieldValue::Date(v) => query.bind(*v),
        FieldValue::TextList(v) => query.bind(v.clone()),
    }
}

// ---------------------------------------------------------------------------
// SQL builders
// ---------------------------------------------------------------------------

fn select_all_sql(def: &ResourceDef) -> String {
    format!(
        "SELECT to_jsonb(t) FROM \"{}\" AS t \
         ORDER BY t.\"{}\" DESC NULLS LAST, t.id DESC",
        def.table, def.order_by
    )
}

fn select_one_sql(def: &ResourceDef) -> String {
    format!("SELECT to_jsonb(t) FROM \"{}\" AS t WHERE t.id = $1", def.table)
}

/// Values bind as `$1..$n` in field order.
fn insert_sql(def: &ResourceDef, fields: &[(&'static str, FieldValue)]) -> String {
    let columns: Vec<String> = fields.iter().map(|(name, _)| format!("\"{name}\"")).collect();
    let params: Vec<String> = (1..=fields.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO \"{}\" AS t ({}) VALUES ({}) RETURNING to_jsonb(t)",
        def.table,
        columns.join(", "),
        params.join(", ")
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Touch {
    UpdatedAt,
    Nothing,
}

/// `$1` is the id; values bind as `$2..$n+1` in field order.
fn update_sql(def: &ResourceDef, fields: &[(&'static str, FieldValue)], touch: Touch) -> String {
    let assignments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, (name, _))| format!("\"{name}\" = ${}", i + 2))
        .chain((touch == Touch::UpdatedAt).then(|| "updated_at = NOW()".to_string()))
        .collect();
    format!(
        "UPDATE \"{}\" AS t SET {} WHERE t.id = $1 RETURNING to_jsonb(t)",
        def.table,
        assignments.join(", ")
    )
}
