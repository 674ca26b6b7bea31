//! Diagnostic logging configuration.
//!
//! Level: `-q`/`-v`, then `PD_LOG`, then `RUST_LOG` directives, then `info`.
//! Format: `--log-format`, then `PD_LOG_FORMAT`, then human.
//!
//! None of this applies to the `user_data` sink, which always logs at `INFO`.

use clap::ValueEnum;
use tracing_subscriber::filter::LevelFilter;

/// Diagnostic output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Human,
    /// One JSON object per line.
    #[value(alias = "json")]
    Jsonl,
}

/// Resolved diagnostic logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Level applied to the pd crates.
    pub level: LevelFilter,
    /// Raw `RUST_LOG` directives, kept only when no explicit level was given.
    pub directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LevelFilter::INFO,
            directives: None,
        }
    }
}

impl LogConfig {
    /// Resolve from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LevelFilter>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(cli_level, cli_format, |key| std::env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup<F>(cli_level: Option<LevelFilter>, cli_format: Option<LogFormat>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LogConfig::default();

        let env_level = lookup("PD_LOG").and_then(|v| v.trim().parse::<LevelFilter>().ok());
        match cli_level.or(env_level) {
            Some(level) => config.level = level,
            None => {
                config.directives = lookup("RUST_LOG").filter(|v| !v.trim().is_empty());
            }
        }

        config.format = cli_format
            .or_else(|| {
                lookup("PD_LOG_FORMAT").and_then(|v| LogFormat::from_str(v.trim(), true).ok())
            })
            .unwrap_or_default();

        config
    }
}
