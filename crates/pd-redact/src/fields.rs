//! Sensitive field sets.

use crate::error::{RedactionError, Result};
use serde::{Deserialize, Serialize};

/// Fields treated as personal data unless the caller says otherwise.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Ordered list of sensitive field names.
///
/// Duplicates are kept as given but matching treats the list as a set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    names: Vec<String>,
}

impl FieldSet {
    /// Build a field set, rejecting names that can never match a segment
    /// split on `separator`.
    pub fn new<I, S>(names: I, separator: char) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self::unchecked(names);
        for name in &set.names {
            validate_name(name, separator)?;
        }
        Ok(set)
    }

    /// Build a field set without validation.
    ///
    /// Names containing `=` or the separator simply never match.
    pub fn unchecked<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The default PII field set.
    pub fn pii() -> Self {
        Self::unchecked(PII_FIELDS)
    }

    /// Parse a comma separated list such as `"name,email,ssn"`.
    ///
    /// Blank entries are skipped, surrounding whitespace is trimmed.
    pub fn parse_list(list: &str, separator: char) -> Result<Self> {
        Self::new(
            list.split(',').map(str::trim).filter(|s| !s.is_empty()),
            separator,
        )
    }

    /// Whether `field` is one of the sensitive names (exact match).
    pub fn contains(&self, field: &str) -> bool {
        self.names.iter().any(|n| n == field)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn validate_name(name: &str, separator: char) -> Result<()> {
    let reason = if name.is_empty() {
        "empty"
    } else if name.contains('=') {
        "contains '='"
    } else if name.contains(separator) {
        "contains the separator"
    } else {
        return Ok(());
    };
    Err(RedactionError::InvalidField {
        name: name.to_string(),
        reason,
    })
}
