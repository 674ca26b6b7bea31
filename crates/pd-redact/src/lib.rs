//! PII redaction and password hashing for personal data logs.
//!
//! This crate provides the text transformation applied to every log line that
//! may carry personal data, plus the salted hashing used to store passwords.
//!
//! # Key Features
//!
//! - **Field-aware redaction**: messages made of `field=value` segments have the
//!   value of every sensitive field replaced by a fixed token.
//! - **Separator-aware**: segments are split on a single separator character and
//!   rejoined verbatim, so structure and non-sensitive values survive untouched.
//! - **Redacting formatter**: renders a log record through a fixed template and
//!   redacts the whole rendered line.
//! - **Password hashing**: bcrypt with a fresh salt per hash; verification never
//!   fails loudly, it answers `false`.
//!
//! # Example
//!
//! ```
//! use pd_redact::{filter_datum, FieldSet};
//!
//! let fields = FieldSet::unchecked(["password", "date_of_birth"]);
//! let out = filter_datum(
//!     &fields,
//!     "xxx",
//!     "name=egg;email=eggmin@eggsample.com;password=eggpass;date_of_birth=12/12/1986;",
//!     ';',
//! );
//! assert_eq!(
//!     out,
//!     "name=egg;email=eggmin@eggsample.com;password=xxx;date_of_birth=xxx;"
//! );
//! ```

pub mod error;
pub mod fields;
pub mod filter;
pub mod formatter;
pub mod password;

pub use error::{RedactionError, Result};
pub use fields::{FieldSet, PII_FIELDS};
pub use filter::{filter_datum, Redactor};
pub use formatter::{Level, LogRecord, RedactingFormatter};
pub use password::{hash_password, hash_password_with_cost, is_valid};
