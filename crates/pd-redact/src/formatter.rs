//! Redacting log formatter.
//!
//! Renders a record through a fixed line template and then redacts the whole
//! rendered line, not just the message part.

use crate::fields::FieldSet;
use crate::filter::Redactor;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case level name as it appears in rendered lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// A single log record before formatting.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Logger name, e.g. `user_data`.
    pub name: String,
    pub level: Level,
    /// Creation time, rendered as `asctime`.
    pub created: DateTime<Local>,
    /// Fully rendered message text.
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            created: Local::now(),
            message: message.into(),
        }
    }

    /// Replace the creation time.
    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    /// Creation time as `YYYY-MM-DD HH:MM:SS,mmm`.
    pub fn asctime(&self) -> String {
        self.created.format("%Y-%m-%d %H:%M:%S,%3f").to_string()
    }
}

/// Formatter that redacts sensitive fields from every rendered line.
///
/// Line template: `[APP] <logger-name> <LEVEL> <asctime>: <message>`.
#[derive(Debug, Clone)]
pub struct RedactingFormatter {
    redactor: Redactor,
    app_name: String,
}

impl RedactingFormatter {
    pub const REDACTION: &'static str = "***";
    pub const SEPARATOR: char = ';';
    pub const DEFAULT_APP_NAME: &'static str = "HOLBERTON";

    /// Create a formatter for the given sensitive fields.
    pub fn new(fields: FieldSet) -> Self {
        Self {
            redactor: Redactor::from_parts(fields, Self::REDACTION, Self::SEPARATOR),
            app_name: Self::DEFAULT_APP_NAME.to_string(),
        }
    }

    /// Override the bracketed application name in the line prefix.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// Render the record through the template without redaction.
    pub fn render(&self, record: &LogRecord) -> String {
        self.render_with(record, &record.message)
    }

    /// Render the record and redact the entire line.
    ///
    /// The message is redacted on its own first: in the full line its first
    /// segment also carries the template prefix, so a field at the start of
    /// the message would otherwise never match.
    pub fn format(&self, record: &LogRecord) -> String {
        let message = self.redactor.redact(&record.message);
        self.redactor.redact(&self.render_with(record, &message))
    }

    fn render_with(&self, record: &LogRecord, message: &str) -> String {
        format!(
            "[{}] {} {} {:<15}: {}",
            self.app_name,
            record.name,
            record.level,
            record.asctime(),
            message
        )
    }
}

impl Default for RedactingFormatter {
    fn default() -> Self {
        Self::new(FieldSet::pii())
    }
}
