//! Field redaction over `field=value` segments.
//!
//! A message is split on the separator, each segment is checked on its own and
//! the message is rebuilt with the same separators. The field name of a
//! segment is everything before its first `=`; a segment without `=` is not a
//! field and passes through untouched.

use crate::error::{RedactionError, Result};
use crate::fields::FieldSet;
use std::borrow::Cow;

/// Replace the value of every sensitive field in `message` with `redaction`.
///
/// Never fails. The number of segments and the position of every separator are
/// preserved, and a sensitive field at the very start of the message is
/// redacted like any other.
pub fn filter_datum(fields: &FieldSet, redaction: &str, message: &str, separator: char) -> String {
    if fields.is_empty() {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len());
    for (i, segment) in message.split(separator).enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(&redact_segment(fields, redaction, segment));
    }
    out
}

fn redact_segment<'a>(fields: &FieldSet, redaction: &str, segment: &'a str) -> Cow<'a, str> {
    match segment.split_once('=') {
        Some((field, _)) if fields.contains(field) => Cow::Owned(format!("{field}={redaction}")),
        _ => Cow::Borrowed(segment),
    }
}

/// A configured redactor: field set, token and separator fixed at construction.
#[derive(Debug, Clone)]
pub struct Redactor {
    fields: FieldSet,
    redaction: String,
    separator: char,
}

impl Redactor {
    /// Create a redactor.
    ///
    /// The token may not contain the separator, otherwise redacting twice would
    /// split a value into new segments.
    pub fn new(fields: FieldSet, redaction: impl Into<String>, separator: char) -> Result<Self> {
        let redaction = redaction.into();
        if redaction.contains(separator) {
            return Err(RedactionError::InvalidToken("token contains the separator"));
        }
        Ok(Self {
            fields,
            redaction,
            separator,
        })
    }

    /// Build from parts already known to be consistent.
    pub(crate) fn from_parts(fields: FieldSet, redaction: &str, separator: char) -> Self {
        debug_assert!(!redaction.contains(separator));
        Self {
            fields,
            redaction: redaction.to_string(),
            separator,
        }
    }

    /// Redact a whole message.
    pub fn redact(&self, message: &str) -> String {
        filter_datum(&self.fields, &self.redaction, message, self.separator)
    }

    /// Redact a single segment (no separator handling).
    pub fn redact_segment<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        redact_segment(&self.fields, &self.redaction, segment)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    pub fn separator(&self) -> char {
        self.separator
    }
}
