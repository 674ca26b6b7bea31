//! In-memory row source.

use super::{validate_table, RowSet, RowSource, SourceError};
use std::collections::HashMap;

/// Tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, RowSet>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table.
    pub fn with_table(mut self, name: impl Into<String>, rows: RowSet) -> Self {
        self.tables.insert(name.into(), rows);
        self
    }
}

impl RowSource for MemorySource {
    fn fetch_all(&mut self, table: &str) -> Result<RowSet, SourceError> {
        validate_table(table)?;
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.to_string()))
    }
}
