//! Error types for redaction and password hashing.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while configuring a redactor or hashing a password.
///
/// Redacting a message never fails; only configuration and hashing do.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// A sensitive field name cannot be matched against `field=value` segments.
    #[error("invalid field name {name:?}: {reason}")]
    InvalidField { name: String, reason: &'static str },

    /// The redaction token would break the segment structure.
    #[error("invalid redaction token: {0}")]
    InvalidToken(&'static str),

    /// The hashing library rejected the request (bad cost, password over 72
    /// bytes, RNG failure).
    #[error("hash error: {0}")]
    HashError(String),
}

impl From<bcrypt::BcryptError> for RedactionError {
    fn from(err: bcrypt::BcryptError) -> Self {
        RedactionError::HashError(err.to_string())
    }
}
