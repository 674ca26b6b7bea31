//! Value resolution and provenance.
//!
//! Resolution order: CLI arguments → environment variables → defaults.

use serde::Serialize;

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved value and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Lookup backed by the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve an optional string: CLI value, then environment variable.
///
/// Returns `None` when neither is present; callers apply their own default
/// or report the value as missing.
pub fn resolve_optional<F>(cli: Option<&str>, var: &str, lookup: &F) -> Option<Resolved<String>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = cli {
        return Some(Resolved::new(value.to_string(), ConfigSource::CliArgument));
    }
    lookup(var).map(|value| Resolved::new(value, ConfigSource::Environment))
}

/// Resolve a string with a built-in default.
pub fn resolve_or<F>(cli: Option<&str>, var: &str, lookup: &F, default: &str) -> Resolved<String>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_optional(cli, var, lookup)
        .unwrap_or_else(|| Resolved::new(default.to_string(), ConfigSource::BuiltinDefault))
}
