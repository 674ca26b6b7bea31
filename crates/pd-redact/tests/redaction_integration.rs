//! Integration tests for pd-redact.
//!
//! These tests verify:
//! - Segment structure is preserved by redaction
//! - Sensitive values never leak through the formatter
//! - Redaction is idempotent
//! - Password hashes round trip and are salted

use chrono::{Local, TimeZone};
use pd_redact::{
    filter_datum, hash_password_with_cost, is_valid, FieldSet, Level, LogRecord,
    RedactingFormatter, Redactor, PII_FIELDS,
};
use proptest::prelude::*;

/// Values that must never appear in a formatted line.
const CANARY_VALUES: &[&str] = &[
    "bob@dylan.com",
    "000-123-0000",
    "(555) 010-9999",
    "bobby2019",
    "Marlene Wood",
];

fn fixed_record(message: &str) -> LogRecord {
    let created = Local
        .with_ymd_and_hms(2024, 1, 15, 14, 30, 22)
        .single()
        .expect("unambiguous local time");
    LogRecord::new("user_data", Level::Info, message).with_created(created)
}

// ============================================================================
// Examples
// ============================================================================

#[test]
fn test_reference_example() {
    let fields = FieldSet::unchecked(["password", "date_of_birth"]);
    let out = filter_datum(
        &fields,
        "xxx",
        "name=egg;email=eggmin@eggsample.com;password=eggpass;date_of_birth=12/12/1986;",
        ';',
    );
    assert_eq!(
        out,
        "name=egg;email=eggmin@eggsample.com;password=xxx;date_of_birth=xxx;"
    );
}

#[test]
fn test_formatter_end_to_end() {
    let formatter = RedactingFormatter::new(FieldSet::unchecked(["email", "ssn", "password"]));
    let line = formatter.format(&fixed_record("name=eggs;ssn=111111;"));

    assert!(line.contains("name=eggs;ssn=***;"), "got {line}");
    assert!(line.starts_with("[HOLBERTON] user_data INFO 2024-01-15 14:30:22,000: "));
    assert!(!line.contains("111111"));
}

#[test]
fn test_formatter_redacts_leading_field() {
    let formatter = RedactingFormatter::new(FieldSet::pii());
    let line = formatter.format(&fixed_record("name=eggs;ssn=111111;"));

    assert_eq!(
        line,
        "[HOLBERTON] user_data INFO 2024-01-15 14:30:22,000: name=***;ssn=***;"
    );
}

#[test]
fn test_canaries_never_leak_through_formatter() {
    let formatter = RedactingFormatter::default();
    let message = format!(
        "name={};role=admin;email={};phone={};ssn={};password={};",
        CANARY_VALUES[4], CANARY_VALUES[0], CANARY_VALUES[2], CANARY_VALUES[1], CANARY_VALUES[3]
    );
    let line = formatter.format(&fixed_record(&message));

    for canary in CANARY_VALUES {
        assert!(
            !line.contains(canary),
            "canary '{}' leaked in output: {}",
            canary,
            line
        );
    }
    assert!(line.contains("role=admin;"));
}

#[test]
fn test_malformed_segments_do_not_corrupt_neighbours() {
    let redactor = Redactor::new(FieldSet::pii(), "***", ';').unwrap();
    let out = redactor.redact("no equals here;email=a@b.c;=orphan;ssn;phone=1");
    assert_eq!(out, "no equals here;email=***;=orphan;ssn;phone=***");
}

#[test]
fn test_pii_field_constant_matches_default_set() {
    let set = FieldSet::pii();
    assert_eq!(set.iter().collect::<Vec<_>>(), PII_FIELDS.to_vec());
}

// ============================================================================
// Properties
// ============================================================================

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("email".to_string()),
        Just("ssn".to_string()),
        Just("last_login".to_string()),
        Just("user_agent".to_string()),
        "[a-z_]{1,8}",
    ]
}

fn field_value() -> impl Strategy<Value = String> {
    "[^;]{0,12}"
}

fn segments() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((field_name(), field_value()), 0..8)
}

fn join(segments: &[(String, String)]) -> String {
    segments
        .iter()
        .map(|(k, v)| format!("{k}={v};"))
        .collect::<String>()
}

proptest! {
    #[test]
    fn prop_segment_structure_preserved(segs in segments()) {
        let fields = FieldSet::pii();
        let message = join(&segs);
        let out = filter_datum(&fields, "***", &message, ';');

        let parts: Vec<&str> = out.split(';').collect();
        prop_assert_eq!(parts.len(), message.split(';').count());

        for ((field, value), part) in segs.iter().zip(parts.iter()) {
            let (out_field, out_value) = part.split_once('=').unwrap();
            prop_assert_eq!(out_field, field.as_str());
            if fields.contains(field) {
                prop_assert_eq!(out_value, "***");
            } else {
                prop_assert_eq!(out_value, value.as_str());
            }
        }
    }

    #[test]
    fn prop_idempotent(segs in segments()) {
        let fields = FieldSet::pii();
        let once = filter_datum(&fields, "***", &join(&segs), ';');
        let twice = filter_datum(&fields, "***", &once, ';');
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_formatter_message_matches_filter_datum(segs in segments()) {
        let message = join(&segs);
        let line = RedactingFormatter::default().format(&fixed_record(&message));
        let expected = format!(
            "[HOLBERTON] user_data INFO 2024-01-15 14:30:22,000: {}",
            filter_datum(&FieldSet::pii(), "***", &message, ';')
        );
        prop_assert_eq!(line, expected);
    }

    #[test]
    fn prop_empty_field_set_is_identity(message in ".{0,64}") {
        let out = filter_datum(&FieldSet::default(), "***", &message, ';');
        prop_assert_eq!(out, message);
    }

    #[test]
    fn prop_never_panics_on_arbitrary_input(message in ".{0,64}", sep in any::<char>()) {
        let _ = filter_datum(&FieldSet::pii(), "***", &message, sep);
    }
}

// ============================================================================
// Password hashing
// ============================================================================

#[test]
fn test_hash_round_trip_and_salting() {
    let first = hash_password_with_cost("correct horse", 4).unwrap();
    let second = hash_password_with_cost("correct horse", 4).unwrap();

    assert_ne!(first, second);
    assert!(is_valid(&first, "correct horse"));
    assert!(is_valid(&second, "correct horse"));
    assert!(!is_valid(&first, "battery staple"));
}
