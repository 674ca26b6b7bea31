//! MySQL row source.
//!
//! The driver is async; the source owns a current-thread runtime and blocks on
//! every call so callers stay synchronous.

use super::{validate_table, RowSet, RowSource, SourceError, Value};
use chrono::{NaiveDate, NaiveDateTime};
use pd_config::DbConfig;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::time::Duration;
use tokio::runtime::Runtime;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Row source backed by a MySQL database.
pub struct MySqlSource {
    runtime: Runtime,
    pool: MySqlPool,
    target: String,
}

impl MySqlSource {
    /// Connect using resolved configuration.
    pub fn connect(config: &DbConfig) -> Result<Self, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);

        let target = config.redacted_url();
        tracing::debug!(target_url = %target, "connecting to database");

        let pool = runtime
            .block_on(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_with(options),
            )
            .map_err(|e| SourceError::Connect {
                target: target.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            runtime,
            pool,
            target,
        })
    }

    /// Masked connection URL.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl RowSource for MySqlSource {
    fn fetch_all(&mut self, table: &str) -> Result<RowSet, SourceError> {
        validate_table(table)?;
        let sql = format!("SELECT * FROM `{}`", table);

        let rows = self
            .runtime
            .block_on(sqlx::query(&sql).fetch_all(&self.pool))
            .map_err(|e| SourceError::Query {
                table: table.to_string(),
                message: e.to_string(),
            })?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(RowSet {
            columns,
            rows: rows.iter().map(decode_row).collect(),
        })
    }
}

impl Drop for MySqlSource {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

fn decode_row(row: &MySqlRow) -> Vec<Value> {
    (0..row.len()).map(|idx| decode_value(row, idx)).collect()
}

fn get<'r, T>(row: &'r MySqlRow, idx: usize) -> Option<T>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get::<T, _>(idx).ok()
}

fn decode_value(row: &MySqlRow, idx: usize) -> Value {
    let type_name = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    let decoded = match type_name.as_str() {
        "BOOLEAN" => get::<bool>(row, idx).map(Value::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            get::<i64>(row, idx).map(Value::Int)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => get::<u64>(row, idx).map(Value::UInt),
        "FLOAT" | "DOUBLE" => get::<f64>(row, idx).map(Value::Float),
        "DATE" => get::<NaiveDate>(row, idx).map(Value::Date),
        "DATETIME" | "TIMESTAMP" => get::<NaiveDateTime>(row, idx).map(Value::DateTime),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            get::<Vec<u8>>(row, idx).map(Value::Bytes)
        }
        _ => get::<String>(row, idx).map(Value::Text),
    };

    decoded
        .or_else(|| row.try_get_unchecked::<String, _>(idx).ok().map(Value::Text))
        .unwrap_or_else(|| {
            tracing::debug!(column = idx, type_name = %type_name, "undecodable column value");
            Value::Null
        })
}
