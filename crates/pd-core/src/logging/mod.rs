//! Logging for pd-core.
//!
//! Two independent outputs share one subscriber:
//! - Diagnostics (human or JSONL) on stderr, filtered by `PD_LOG`/`RUST_LOG`
//! - The `user_data` logger: events on the [`USER_DATA_TARGET`] target at
//!   `INFO` and above, rendered and redacted by a [`RedactingFormatter`]
//!
//! Diagnostics never see `user_data` events and the redacting sink never sees
//! diagnostics.
//!
//! # Usage
//!
//! ```ignore
//! use pd_core::logging::{init_logging, LogConfig, USER_DATA_TARGET};
//! use pd_redact::RedactingFormatter;
//!
//! init_logging(&LogConfig::from_env(None, None), RedactingFormatter::default());
//! tracing::info!(target: USER_DATA_TARGET, "name=Bob;email=bob@dylan.com;");
//! ```
//!
//! Tests build the same stack explicitly with [`user_data_layer`] and install
//! it with `tracing::subscriber::with_default`.

pub mod config;
pub mod layer;

pub use config::{LogConfig, LogFormat};
pub use layer::RedactingLayer;

use std::io::{IsTerminal, Write};

use pd_redact::RedactingFormatter;
use tracing::Subscriber;
use tracing_subscriber::filter::{Filtered, LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Target (logger name) of redacted user data records.
pub const USER_DATA_TARGET: &str = "user_data";

/// Crates whose diagnostics are shown by default.
const DIAGNOSTIC_CRATES: &[&str] = &["pd_core", "pd_redact", "pd_config"];

/// The redacting `user_data` sink, filtered to its own target at `INFO`.
pub fn user_data_layer<S, W>(
    writer: W,
    formatter: RedactingFormatter,
) -> Filtered<RedactingLayer<W>, Targets, S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    RedactingLayer::new(writer, formatter)
        .with_filter(Targets::new().with_target(USER_DATA_TARGET, LevelFilter::INFO))
}

/// Diagnostic filter: `RUST_LOG` directives when present and valid, else
/// `config.level` for our crates. `user_data` is always excluded.
fn diagnostic_filter(config: &LogConfig) -> EnvFilter {
    let per_crate = || {
        let directives: Vec<String> = DIAGNOSTIC_CRATES
            .iter()
            .map(|krate| format!("{}={}", krate, config.level))
            .collect();
        EnvFilter::new(directives.join(","))
    };
    let filter = match config.directives.as_deref() {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| per_crate()),
        None => per_crate(),
    };
    match format!("{}=off", USER_DATA_TARGET).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig, formatter: RedactingFormatter) {
    let filter = diagnostic_filter(config);

    match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            tracing_subscriber::registry()
                .with(fmt_layer.with_filter(filter))
                .with(user_data_layer(std::io::stderr(), formatter))
                .init();
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(json_layer.with_filter(filter))
                .with(user_data_layer(std::io::stderr(), formatter))
                .init();
        }
    }
}
