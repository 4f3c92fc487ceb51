/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A persisted row as returned to API clients: column name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;
