//! Database connection settings.

use crate::resolve::{env_lookup, resolve_optional, resolve_or, ConfigSource};
use crate::{ConfigError, Result};
use serde::{Serialize, Serializer};

pub const ENV_DB_USERNAME: &str = "PERSONAL_DATA_DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "PERSONAL_DATA_DB_PASSWORD";
pub const ENV_DB_HOST: &str = "PERSONAL_DATA_DB_HOST";
pub const ENV_DB_PORT: &str = "PERSONAL_DATA_DB_PORT";
pub const ENV_DB_NAME: &str = "PERSONAL_DATA_DB_NAME";

pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct DbOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
}

/// Provenance of each resolved setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DbSources {
    pub username: ConfigSource,
    pub password: ConfigSource,
    pub host: ConfigSource,
    pub port: ConfigSource,
    pub database: ConfigSource,
}

/// Connection settings for the personal data database.
///
/// The password is never printed: `Debug` and `Serialize` mask it.
#[derive(Clone, Serialize)]
pub struct DbConfig {
    pub username: String,
    #[serde(serialize_with = "serialize_masked")]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub sources: DbSources,
}

impl DbConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(&DbOverrides::default(), env_lookup)
    }

    /// Resolve from an arbitrary key lookup, without CLI overrides.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(&DbOverrides::default(), lookup)
    }

    /// Resolve using CLI overrides, then `lookup`, then defaults.
    ///
    /// A missing or empty database name is fatal.
    pub fn resolve<F>(overrides: &DbOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = resolve_or(
            overrides.username.as_deref(),
            ENV_DB_USERNAME,
            &lookup,
            DEFAULT_USERNAME,
        );
        let password = resolve_or(
            overrides.password.as_deref(),
            ENV_DB_PASSWORD,
            &lookup,
            DEFAULT_PASSWORD,
        );
        let host = resolve_or(overrides.host.as_deref(), ENV_DB_HOST, &lookup, DEFAULT_HOST);

        let (port, port_source) = match overrides.port {
            Some(port) => (port, ConfigSource::CliArgument),
            None => match lookup(ENV_DB_PORT) {
                Some(raw) => (parse_port(&raw)?, ConfigSource::Environment),
                None => (DEFAULT_PORT, ConfigSource::BuiltinDefault),
            },
        };

        let database = resolve_optional(overrides.database.as_deref(), ENV_DB_NAME, &lookup)
            .filter(|resolved| !resolved.value.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseName { var: ENV_DB_NAME })?;

        Ok(Self {
            username: username.value,
            password: password.value,
            host: host.value,
            port,
            database: database.value,
            sources: DbSources {
                username: username.source,
                password: password.source,
                host: host.source,
                port: port_source,
                database: database.source,
            },
        })
    }

    /// Connection URL with the password masked, for logs and diagnostics.
    pub fn redacted_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username,
            mask(&self.password),
            self.host,
            self.port,
            self.database
        )
    }

    /// Pretty JSON view of the settings (password masked).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var: ENV_DB_PORT,
            reason: "port must be non-zero".to_string(),
        }),
        Ok(port) => Ok(port),
        Err(e) => Err(ConfigError::InvalidValue {
            var: ENV_DB_PORT,
            reason: e.to_string(),
        }),
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

fn serialize_masked<S: Serializer>(secret: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(mask(secret))
}
