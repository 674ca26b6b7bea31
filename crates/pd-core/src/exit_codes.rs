//! Exit codes for the pd-core CLI.
//!
//! Exit code ranges:
//! - 0-9: Success/operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

/// Exit codes for pd-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Success / Operational Outcomes (0-9)
    // ========================================================================
    /// Success
    Clean = 0,

    /// Password did not match the stored hash
    Mismatch = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Missing or invalid configuration
    ConfigError = 11,

    /// Database unreachable or query failed
    SourceError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<pd_config::ConfigError> for ExitCode {
    fn from(err: pd_config::ConfigError) -> Self {
        match err {
            pd_config::ConfigError::Serialize(_) => ExitCode::InternalError,
            _ => ExitCode::ConfigError,
        }
    }
}
