//! Payload validation for generic resources.
//!
//! [`validate_payload`] turns an untyped JSON body into one [`FieldValue`]
//! per column of a [`ResourceDef`], so that no SQL is built from unchecked
//! input. Every column is produced (absent optional columns become typed
//! NULLs), which makes `PUT` a full replace. Unknown keys such as `id` or
//! `created_at` resubmitted by the admin UI are ignored.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use crate::error::{CoreError, FieldError};
use crate::resource::{ColumnKind, ColumnSpec, FieldValue, Fields, ResourceDef};
use crate::types::DbId;

/// Validate a request body against a resource definition.
pub fn validate_payload(def: &ResourceDef, body: &Value) -> Result<Fields, CoreError> {
    let object = body
        .as_object()
        .ok_or_else(|| CoreError::Validation("Request body must be a JSON object".into()))?;

    let mut fields = Vec::with_capacity(def.columns.len());
    let mut errors = Vec::new();

    for column in def.columns {
        match coerce(column, object.get(column.name)) {
            Ok(value) => fields.push((column.name, value)),
            Err(message) => errors.push(FieldError::new(column.name, message)),
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(CoreError::InvalidFields(errors))
    }
}

/// Parse a path `id` segment.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(format!("Invalid id '{raw}'")))
}

fn coerce(column: &ColumnSpec, raw: Option<&Value>) -> Result<FieldValue, String> {
    let value = match raw {
        None | Some(Value::Null) => return missing(column),
        // HTML forms submit "" for untouched non-text inputs.
        Some(Value::String(s)) if s.trim().is_empty() && column.kind != ColumnKind::Text => {
            return missing(column)
        }
        Some(value) => value,
    };

    match column.kind {
        ColumnKind::Text => {
            let s = as_str(value)?;
            if column.required && s.trim().is_empty() {
                return Err("is required".into());
            }
            Ok(FieldValue::text(s))
        }
        ColumnKind::Email => {
            let s = as_str(value)?.trim();
            if !s.validate_email() {
                return Err("must be a valid email address".into());
            }
            Ok(FieldValue::text(s))
        }
        ColumnKind::Url => {
            let s = as_str(value)?.trim();
            if !s.validate_url() {
                return Err("must be a valid URL".into());
            }
            Ok(FieldValue::text(s))
        }
        ColumnKind::Date => parse_date(as_str(value)?).map(|d| FieldValue::Date(Some(d))),
        ColumnKind::Integer { min, max } => {
            let n = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| "must be a whole number".to_string())?;
            if n < i64::from(min) || n > i64::from(max) {
                return Err(format!("must be between {min} and {max}"));
            }
            // In range of two i32 bounds, so the conversion cannot fail.
            Ok(FieldValue::Integer(i32::try_from(n).ok()))
        }
        ColumnKind::Boolean => value
            .as_bool()
            .map(|b| FieldValue::Boolean(Some(b)))
            .ok_or_else(|| "must be true or false".to_string()),
        ColumnKind::TextList => parse_text_list(value).map(|v| FieldValue::TextList(Some(v))),
    }
}

fn missing(column: &ColumnSpec) -> Result<FieldValue, String> {
    if column.required {
        Err("is required".into())
    } else {
        Ok(FieldValue::null(column.kind))
    }
}

fn as_str(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "must be a string".to_string())
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of month) and RFC 3339 timestamps.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| "must be a date (YYYY-MM-DD)".to_string())
}

/// Accepts a JSON array of strings or a comma-separated string.
fn parse_text_list(value: &Value) -> Result<Vec<String>, String> {
    let items: Vec<&str> = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| "must contain only strings".to_string()))
            .collect::<Result<_, _>>()?,
        Value::String(s) => s.split(',').collect(),
        _ => return Err("must be a list of strings".into()),
    };

    Ok(items
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}
