//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{DatabaseDriver, DriverError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {source}")]
    DriverError { name: String, source: DriverError },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Postgres options.
    pub pg: DatabasePgConfig,
}

#[derive(Debug, Clone)]
pub struct DatabasePgConfig {
    /// Database URL.
    pub url: String,
    /// Database pool size.
    pub pool_size: u32,
    /// Database connection timeout (in seconds)
    pub connection_timeout: u32,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database options.
    pub database: DatabaseConfig,
    /// Project used when an issue is created without one.
    pub default_project: String,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, ConfigError> {
        Ok(Config {
            database: DatabaseConfig {
                driver: env_to_driver("ISSUES_DATABASE_DRIVER", "memory")?,
                pg: DatabasePgConfig {
                    url: env_to_str("ISSUES_DATABASE_PG_URL", ""),
                    pool_size: env_to_u32("ISSUES_DATABASE_PG_POOL_SIZE", 20),
                    connection_timeout: env_to_u32("ISSUES_DATABASE_PG_CONNECTION_TIMEOUT", 5),
                },
            },
            default_project: env_to_str("ISSUES_DEFAULT_PROJECT", "apitest"),
            logging: LoggingConfig {
                use_bunyan: env_to_bool("ISSUES_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("ISSUES_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("ISSUES_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("ISSUES_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("ISSUES_SERVER_BIND_PORT", 3000),
                workers_count: env_to_optional_u16("ISSUES_SERVER_WORKERS_COUNT", None),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Self, ConfigError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_driver(name: &str, default: &str) -> Result<DatabaseDriver, ConfigError> {
    DatabaseDriver::from_str(&env_to_str(name, default)).map_err(|e| ConfigError::DriverError {
        name: name.into(),
        source: e,
    })
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
