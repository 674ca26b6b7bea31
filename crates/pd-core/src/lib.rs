//! Personal data core library.
//!
//! This crate provides:
//! - The logging stack, including the redacting `user_data` sink layer
//! - Row sources (in-memory and MySQL)
//! - The row-to-log adapter that emits one redacted line per row
//! - Stable exit codes for the `pd-core` binary

pub mod exit_codes;
pub mod logging;
pub mod rows;
pub mod source;

pub use pd_config as config;
pub use pd_redact as redact;
