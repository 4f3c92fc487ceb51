//! Generic resource definitions.
//!
//! A [`ResourceDef`] describes one portfolio entity: the table it lives in,
//! the path it is mounted at, the domain columns a client may write and the
//! column its listing is sorted by. One router factory and one store
//! implementation serve every definition, so adding an entity means adding a
//! definition to [`crate::catalog`] and a migration.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Columns every table carries that clients never write directly.
pub const SYSTEM_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Storage/validation type of a domain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Text that must parse as an email address.
    Email,
    /// Text that must parse as an absolute URL.
    Url,
    /// Calendar date, stored as `DATE`.
    Date,
    /// Whole number within an inclusive range, stored as `INTEGER`.
    Integer { min: i32, max: i32 },
    Boolean,
    /// List of strings, stored as `TEXT[]`.
    TextList,
}

/// One writable column of a resource.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

impl ColumnSpec {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Who may read a resource. Writes always require an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAccess {
    Public,
    Admin,
}

/// Definition of one CRUD resource.
#[derive(Debug)]
pub struct ResourceDef {
    /// Human-readable singular label used in logs and messages.
    pub entity: &'static str,
    /// Database table name.
    pub table: &'static str,
    /// Mount path below `/api` (leading slash included).
    pub path: &'static str,
    /// Domain columns replaced by `POST` and `PUT`.
    pub columns: &'static [ColumnSpec],
    /// Listing sort column; always descending, NULLs last, ties by `id`.
    pub order_by: &'static str,
    pub read_access: ReadAccess,
}

impl ResourceDef {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

/// A validated, typed value ready to be bound to a query parameter.
///
/// NULLs keep their kind so the store can bind a correctly typed parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Boolean(Option<bool>),
    Date(Option<NaiveDate>),
    TextList(Option<Vec<String>>),
}

impl FieldValue {
    /// A NULL of the storage type backing `kind`.
    pub fn null(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Text | ColumnKind::Email | ColumnKind::Url => FieldValue::Text(None),
            ColumnKind::Date => FieldValue::Date(None),
            ColumnKind::Integer { .. } => FieldValue::Integer(None),
            ColumnKind::Boolean => FieldValue::Boolean(None),
            ColumnKind::TextList => FieldValue::TextList(None),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(Some(value.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self,
            FieldValue::Text(None)
                | FieldValue::Integer(None)
                | FieldValue::Boolean(None)
                | FieldValue::Date(None)
                | FieldValue::TextList(None)
        )
    }

    /// JSON representation matching what PostgreSQL's `to_jsonb` produces.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Date(Some(d)) => Value::String(d.format("%Y-%m-%d").to_string()),
            other => serde_json::to_value(other).unwrap_or(Value::Null),
        }
    }
}

/// Column/value pairs in column order.
pub type Fields = Vec<(&'static str, FieldValue)>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_keeps_storage_kind() {
        assert_eq!(FieldValue::null(ColumnKind::Email), FieldValue::Text(None));
        assert_eq!(
            FieldValue::null(ColumnKind::Integer { min: 0, max: 5 }),
            FieldValue::Integer(None)
        );
        assert!(FieldValue::null(ColumnKind::TextList).is_null());
    }

    #[test]
    fn to_json_formats_dates_and_lists() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        assert_eq!(FieldValue::Date(Some(date)).to_json(), json!("2023-09-01"));
        assert_eq!(
            FieldValue::TextList(Some(vec!["rust".into(), "sql".into()])).to_json(),
            json!(["rust", "sql"])
        );
        assert_eq!(FieldValue::Boolean(None).to_json(), Value::Null);
    }
}
