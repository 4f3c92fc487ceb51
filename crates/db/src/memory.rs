//! In-process store.
//!
//! Mirrors [`crate::PgStore`] semantics (id assignment, timestamps, listing
//! order, JSON shapes) without a database, so the HTTP layer can be tested in
//! isolation. State lives behind a single async lock.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use folio_core::resource::{FieldValue, ResourceDef};
use folio_core::types::{DbId, Record};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::models::admin::{AdminUser, CreateAdmin};
use crate::store::{AdminStore, ResourceStore, StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<&'static str, Table>,
    admins: Vec<AdminUser>,
    /// When set, every operation fails with this message.
    failure: Option<String>,
}

#[derive(Default)]
struct Table {
    last_id: DbId,
    rows: BTreeMap<DbId, Record>,
}

impl Inner {
    fn check(&self) -> StoreResult<()> {
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or recover with `None`).
    pub async fn set_failure(&self, message: Option<&str>) {
        self.inner.write().await.failure = message.map(String::from);
    }

    /// Number of rows currently held for a table.
    pub async fn row_count(&self, table: &str) -> usize {
        self.inner
            .read()
            .await
            .tables
            .get(table)
            .map_or(0, |t| t.rows.len())
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list(&self, def: &ResourceDef) -> StoreResult<Vec<Record>> {
        let inner = self.inner.read().await;
        inner.check()?;

        let mut rows: Vec<Record> = inner
            .tables
            .get(def.table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            compare_desc_nulls_last(a.get(def.order_by), b.get(def.order_by))
                .then_with(|| row_id(b).cmp(&row_id(a)))
        });
        Ok(rows)
    }

    async fn find(&self, def: &ResourceDef, id: DbId) -> StoreResult<Option<Record>> {
        let inner = self.inner.read().await;
        inner.check()?;
        Ok(inner
            .tables
            .get(def.table)
            .and_then(|t| t.rows.get(&id))
            .cloned())
    }

    async fn insert(
        &self,
        def: &ResourceDef,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Record> {
        let mut inner = self.inner.write().await;
        inner.check()?;

        let table = inner.tables.entry(def.table).or_default();
        table.last_id += 1;
        let id = table.last_id;
        let now = timestamp(Utc::now());

        let mut record = Record::new();
        record.insert("id".into(), Value::from(id));
        for (name, value) in fields {
            record.insert((*name).to_string(), value.to_json());
        }
        record.insert("created_at".into(), Value::String(now.clone()));
        record.insert("updated_at".into(), Value::String(now));

        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.write().await;
        inner.check()?;

        let Some(record) = inner
            .tables
            .get_mut(def.table)
            .and_then(|t| t.rows.get_mut(&id))
        else {
            return Ok(None);
        };

        for (name, value) in fields {
            record.insert((*name).to_string(), value.to_json());
        }
        let updated_at = next_timestamp(record.get("updated_at"));
        record.insert("updated_at".into(), Value::String(updated_at));
        Ok(Some(record.clone()))
    }

    async fn annotate(
        &self,
        def: &ResourceDef,
        id: DbId,
        fields: &[(&'static str, FieldValue)],
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        inner.check()?;

        let Some(record) = inner
            .tables
            .get_mut(def.table)
            .and_then(|t| t.rows.get_mut(&id))
        else {
            return Ok(false);
        };
        for (name, value) in fields {
            record.insert((*name).to_string(), value.to_json());
        }
        Ok(true)
    }

    async fn delete(&self, def: &ResourceDef, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        inner.check()?;
        Ok(inner
            .tables
            .get_mut(def.table)
            .is_some_and(|t| t.rows.remove(&id).is_some()))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.read().await.check()
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminUser>> {
        let inner = self.inner.read().await;
        inner.check()?;
        Ok(inner.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn create_admin(&self, input: &CreateAdmin) -> StoreResult<AdminUser> {
        let mut inner = self.inner.write().await;
        inner.check()?;

        if inner.admins.iter().any(|a| a.username == input.username) {
            return Err(StoreError::Duplicate(format!(
                "admin_users.username '{}'",
                input.username
            )));
        }

        let now = Utc::now();
        let admin = AdminUser {
            id: inner.admins.len() as DbId + 1,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.admins.push(admin.clone());
        Ok(admin)
    }
}

/// Same shape PostgreSQL's `to_jsonb` gives a `TIMESTAMPTZ`.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Current time, nudged past `previous` so updates always advance `updated_at`.
fn next_timestamp(previous: Option<&Value>) -> String {
    let now = Utc::now().trunc_subsecs(6);
    let previous = previous
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    match previous {
        Some(prev) if prev >= now => timestamp(prev + chrono::Duration::microseconds(1)),
        _ => timestamp(now),
    }
}

fn row_id(record: &Record) -> DbId {
    record.get("id").and_then(Value::as_i64).unwrap_or_default()
}

fn compare_desc_nulls_last(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(b, a),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        // ISO dates and fixed-format timestamps sort lexicographically.
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
