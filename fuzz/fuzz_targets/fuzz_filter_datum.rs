//! Fuzz target for field redaction.
//!
//! Arbitrary field lists and messages must never panic, and the output must
//! keep the same number of separators as the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pd_redact::{filter_datum, FieldSet};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    fields: Vec<&'a str>,
    redaction: &'a str,
    message: &'a str,
    separator: char,
}

fuzz_target!(|input: Input<'_>| {
    let fields = FieldSet::unchecked(input.fields.iter().copied());
    let out = filter_datum(&fields, input.redaction, input.message, input.separator);

    if !input.redaction.contains(input.separator) {
        assert_eq!(
            out.matches(input.separator).count(),
            input.message.matches(input.separator).count()
        );
    }
});
