use std::time::Duration;

use thiserror::Error;

const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_APP_HOST: &str = "127.0.0.1";
const DEFAULT_APP_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable `{0}` must be set")]
    Missing(&'static str),
    #[error("environment variable `{name}` has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub connection_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let db_host = required("DB_HOST")?;
        let db_port = parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?;
        let db_user = required("DB_USER")?;
        let db_password = lookup("DB_PASSWORD").unwrap_or_default();
        let db_name = required("DB_NAME")?;
        let sslmode = lookup("DB_SSLMODE").unwrap_or_else(|| "disable".to_string());

        let url = [
            ("host", db_host),
            ("port", db_port.to_string()),
            ("user", db_user),
            ("password", db_password),
            ("dbname", db_name),
            ("sslmode", sslmode),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", quote_conninfo(value)))
        .collect::<Vec<_>>()
        .join(" ");

        Ok(Self {
            database: DatabaseConfig {
                pool_size: parse_or(&lookup, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?,
                ..DatabaseConfig::from_url(url)
            },
            host: lookup("APP_HOST").unwrap_or_else(|| DEFAULT_APP_HOST.to_string()),
            port: parse_or(&lookup, "APP_PORT", DEFAULT_APP_PORT)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

// libpq keyword/value strings: single quotes around the value, with `\` and `'` escaped.
fn quote_conninfo(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
