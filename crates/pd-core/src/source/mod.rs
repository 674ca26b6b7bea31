//! Row sources.
//!
//! A [`RowSource`] hands back every row of a table together with its column
//! names. The in-memory source backs tests; the MySQL source (feature
//! `mysql`) talks to the real personal data database.

pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use memory::MemorySource;
#[cfg(feature = "mysql")]
pub use mysql::MySqlSource;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// The table holding user records.
pub const USERS_TABLE: &str = "users";

/// Errors from a row source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to connect to {target}: {message}")]
    Connect { target: String, message: String },

    #[error("query on table {table} failed: {message}")]
    Query { table: String, message: String },

    #[error("invalid table name {0:?}")]
    InvalidTable(String),

    #[error("table {0} not found")]
    TableNotFound(String),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// A scalar column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Rows of one table, positionally aligned with `columns`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; builder style.
    pub fn with_row<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Something that can return all rows of a table.
pub trait RowSource {
    fn fetch_all(&mut self, table: &str) -> Result<RowSet, SourceError>;
}

/// Check that `table` is a plain SQL identifier before it is interpolated
/// into a query.
pub fn validate_table(table: &str) -> Result<(), SourceError> {
    static IDENT: OnceLock<Option<Regex>> = OnceLock::new();
    let ident = IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").ok());
    match ident {
        Some(re) if re.is_match(table) => Ok(()),
        _ => Err(SourceError::InvalidTable(table.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::UInt(7).to_string(), "7");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Text("Marlene".into()).to_string(), "Marlene");
        assert_eq!(Value::Bytes(b"abc".to_vec()).to_string(), "abc");

        let date = NaiveDate::from_ymd_opt(2019, 11, 14).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2019-11-14");
        let dt = date.and_hms_opt(6, 14, 24).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2019-11-14 06:14:24");
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_rowset_builder() {
        let set = RowSet::new(["name", "email"])
            .with_row(["Bob", "bob@dylan.com"])
            .with_row(["Ann", "ann@example.com"]);
        assert_eq!(set.columns, vec!["name", "email"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_validate_table() {
        assert!(validate_table("users").is_ok());
        assert!(validate_table("_audit_2024").is_ok());
        assert!(validate_table("").is_err());
        assert!(validate_table("1users").is_err());
        assert!(validate_table("users; DROP TABLE users").is_err());
        assert!(validate_table("users`").is_err());
    }
}
