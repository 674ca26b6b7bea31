//! Salted password hashing.
//!
//! Uses bcrypt: every call to [`hash_password`] draws a fresh random salt, so
//! hashing the same password twice gives two different strings that both
//! verify. Verification collapses every failure to `false`.
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! refused instead of silently truncated, so two passwords sharing a 72-byte
//! prefix never verify against each other.

use crate::error::Result;

/// Longest password bcrypt hashes without truncation, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Cost used by [`hash_password`].
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a password with a random salt and the default cost.
///
/// The result is the opaque `$2b$...` string to store.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash a password with an explicit bcrypt cost (4..=31).
///
/// Fails for passwords longer than [`MAX_PASSWORD_BYTES`].
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::non_truncating_hash(password, cost)?)
}

/// Check a password against a stored hash.
///
/// Returns `false` for a wrong password and for any verification error
/// (corrupt hash, unknown version, bad cost, password over
/// [`MAX_PASSWORD_BYTES`]). Never panics.
pub fn is_valid(hashed_password: &str, password: &str) -> bool {
    match bcrypt::non_truncating_verify(password, hashed_password) {
        Ok(valid) => valid,
        Err(err) => {
            tracing::debug!(error = %err, "password hash could not be verified");
            false
        }
    }
}
