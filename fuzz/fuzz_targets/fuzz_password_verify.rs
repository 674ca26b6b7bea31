//! Fuzz target for password verification.
//!
//! Arbitrary stored hashes must be rejected with `false`, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_redact::is_valid;

fuzz_target!(|data: (&str, &str)| {
    let (hashed, password) = data;
    let _ = is_valid(hashed, password);
});
