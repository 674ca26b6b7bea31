//! Redacting tracing layer.
//!
//! Every event that reaches this layer is turned into a [`LogRecord`], rendered
//! through a [`RedactingFormatter`] and written as one line to the injected
//! writer. Nothing reaches the writer unredacted.

use std::io::{self, Write};
use std::sync::Mutex;

use pd_redact::{Level, LogRecord, RedactingFormatter};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Collects the event message and appends any extra fields as `key=value`
/// segments so they go through redaction too.
struct MessageVisitor {
    separator: char,
    message: String,
    fields: Vec<(String, String)>,
}

impl MessageVisitor {
    fn new(separator: char) -> Self {
        MessageVisitor {
            separator,
            message: String::new(),
            fields: Vec::new(),
        }
    }

    fn finish(self) -> String {
        let mut out = self.message;
        for (name, value) in self.fields {
            if !out.is_empty() && !out.ends_with(self.separator) {
                out.push(self.separator);
            }
            out.push_str(&name);
            out.push('=');
            out.push_str(&value);
            out.push(self.separator);
        }
        out
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        if field.name() == "message" {
            self.message = s;
        } else {
            self.fields.push((field.name().to_string(), s));
        }
    }
}

/// Tracing layer that writes redacted lines to `W`.
pub struct RedactingLayer<W = io::Stderr> {
    writer: Mutex<W>,
    formatter: RedactingFormatter,
}

impl RedactingLayer<io::Stderr> {
    /// Create a layer writing to stderr.
    pub fn stderr(formatter: RedactingFormatter) -> Self {
        RedactingLayer::new(io::stderr(), formatter)
    }
}

impl<W: Write> RedactingLayer<W> {
    /// Create a layer with a custom writer.
    pub fn new(writer: W, formatter: RedactingFormatter) -> Self {
        RedactingLayer {
            writer: Mutex::new(writer),
            formatter,
        }
    }

    pub fn formatter(&self) -> &RedactingFormatter {
        &self.formatter
    }
}

impl<S, W> Layer<S> for RedactingLayer<W>
where
    S: Subscriber,
    W: Write + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::new(self.formatter.redactor().separator());
        event.record(&mut visitor);

        let metadata = event.metadata();
        let record = LogRecord::new(
            metadata.target(),
            Level::from(*metadata.level()),
            visitor.finish(),
        );
        let line = self.formatter.format(&record);

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}
