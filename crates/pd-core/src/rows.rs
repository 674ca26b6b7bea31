//! Row-to-log adapter.
//!
//! Turns each row into a `name=value<sep>...` message and emits it on the
//! `user_data` target, where the redacting sink picks it up.

use crate::logging::USER_DATA_TARGET;
use crate::source::{RowSource, SourceError, Value};

/// Join `name=value` pairs with `separator`, ending with one separator.
///
/// Extra values without a column name (or names without a value) are dropped.
pub fn format_row(columns: &[String], row: &[Value], separator: char) -> String {
    let mut out = String::new();
    for (name, value) in columns.iter().zip(row.iter()) {
        out.push_str(name);
        out.push('=');
        out.push_str(&value.to_string());
        out.push(separator);
    }
    out
}

/// Fetch every row of `table` and log one `INFO` record per row.
///
/// Returns the number of rows logged.
pub fn log_rows<S>(source: &mut S, table: &str, separator: char) -> Result<usize, SourceError>
where
    S: RowSource + ?Sized,
{
    let set = source.fetch_all(table)?;
    tracing::debug!(
        table,
        columns = set.columns.len(),
        rows = set.rows.len(),
        "fetched rows"
    );

    if set.rows.iter().any(|row| row.len() != set.columns.len()) {
        tracing::warn!(table, "row width does not match column count");
    }

    for row in &set.rows {
        let message = format_row(&set.columns, row, separator);
        tracing::info!(target: USER_DATA_TARGET, "{}", message);
    }

    Ok(set.rows.len())
}
