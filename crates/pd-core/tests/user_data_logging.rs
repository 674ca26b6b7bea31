//! End-to-end tests for the row-to-log path.
//!
//! Rows from an in-memory source are logged through the `user_data` sink and
//! the captured lines are checked for redaction.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pd_core::logging::{user_data_layer, USER_DATA_TARGET};
use pd_core::rows::log_rows;
use pd_core::source::{MemorySource, RowSet, Value, USERS_TABLE};
use pd_redact::{FieldSet, RedactingFormatter};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn users_source() -> MemorySource {
    let rows = RowSet::new([
        "name",
        "email",
        "phone",
        "ssn",
        "password",
        "ip",
        "last_login",
        "user_agent",
    ])
    .with_row([
        Value::from("Marlene Wood"),
        Value::from("hwestiii@att.net"),
        Value::from("(473) 401-4253"),
        Value::from("261-72-6780"),
        Value::from("K5?BMNv"),
        Value::from("60ed:c396:2ff:244:bbd0:9208:26f2:93ea"),
        Value::from("2019-11-14 06:14:24"),
        Value::from("Mozilla/5.0"),
    ])
    .with_row([
        Value::from("Belen Bailey"),
        Value::from("bcevc@yahoo.com"),
        Value::from("(539) 233-4942"),
        Value::from("203-38-5395"),
        Value::from("^3EZ~TkX"),
        Value::from("f724:c5d1:a14d:c4c5:bae2:9457:3769:1969"),
        Value::from("2019-11-14 06:16:19"),
        Value::Null,
    ]);
    MemorySource::new().with_table(USERS_TABLE, rows)
}

fn capture<F: FnOnce()>(formatter: RedactingFormatter, f: F) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(user_data_layer(SharedBuffer(buffer.clone()), formatter));
    tracing::subscriber::with_default(subscriber, f);
    let out = buffer.lock().unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn users_rows_are_logged_redacted() {
    let mut source = users_source();
    let out = capture(RedactingFormatter::default(), || {
        let count = log_rows(&mut source, USERS_TABLE, ';').unwrap();
        assert_eq!(count, 2);
    });

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");

    for line in &lines {
        assert!(line.starts_with("[HOLBERTON] user_data INFO "), "{line}");
        assert!(
            line.contains(": name=***;email=***;phone=***;ssn=***;password=***;"),
            "{line}"
        );
    }
    assert!(lines[0].ends_with(
        "ip=60ed:c396:2ff:244:bbd0:9208:26f2:93ea;last_login=2019-11-14 06:14:24;user_agent=Mozilla/5.0;"
    ));
    assert!(lines[1].ends_with("user_agent=NULL;"), "{}", lines[1]);
}

#[test]
fn no_sensitive_value_reaches_the_sink() {
    let mut source = users_source();
    let out = capture(RedactingFormatter::default(), || {
        log_rows(&mut source, USERS_TABLE, ';').unwrap();
    });

    for secret in [
        "Marlene Wood",
        "Belen Bailey",
        "hwestiii@att.net",
        "(473) 401-4253",
        "261-72-6780",
        "K5?BMNv",
        "bcevc@yahoo.com",
        "203-38-5395",
        "^3EZ~TkX",
    ] {
        assert!(!out.contains(secret), "leaked {secret}: {out}");
    }
}

#[test]
fn custom_app_name_and_fields() {
    let fields = FieldSet::new(["ip"], ';').unwrap();
    let formatter = RedactingFormatter::new(fields).with_app_name("AUDIT");
    let mut source = users_source();
    let out = capture(formatter, || {
        log_rows(&mut source, USERS_TABLE, ';').unwrap();
    });

    let first = out.lines().next().unwrap();
    assert!(first.starts_with("[AUDIT] user_data INFO "), "{first}");
    assert!(first.contains(";ip=***;"), "{first}");
    assert!(first.contains("email=hwestiii@att.net;"), "{first}");
}

#[test]
fn other_targets_are_ignored_by_the_sink() {
    let out = capture(RedactingFormatter::default(), || {
        tracing::info!(target: "pd_core::rows", "email=diagnostic@example.com;");
        tracing::warn!(target: USER_DATA_TARGET, "id=7;ssn=000-00-0000;");
    });

    assert_eq!(out.lines().count(), 1);
    assert!(out.contains(" WARNING "));
    assert!(out.contains("id=7;ssn=***;"));
    assert!(!out.contains("diagnostic@example.com"));
}

#[test]
fn missing_table_logs_nothing() {
    let mut source = MemorySource::new();
    let out = capture(RedactingFormatter::default(), || {
        assert!(log_rows(&mut source, USERS_TABLE, ';').is_err());
    });
    assert!(out.is_empty());
}
