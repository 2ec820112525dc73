//! Validation utilities.

use std::fmt::Write;

use issues_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        let _ = write!(error, "  - Missing env. var.: {}", name);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "ISSUES_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "ISSUES_SERVER_BIND_PORT");
    }
    if config.default_project.is_empty() {
        _missing(&mut error, "ISSUES_DEFAULT_PROJECT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "ISSUES_DATABASE_PG_URL");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::from_env_no_version().unwrap();
        config.server.bind_ip = "127.0.0.1".into();
        config.server.bind_port = 3000;
        config.default_project = "apitest".into();
        config.database.driver = DatabaseDriver::Memory;
        config
    }

    #[test]
    fn test_valid_configuration() {
        assert!(validate_configuration(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_pg_url() {
        let mut config = valid_config();
        config.database.driver = DatabaseDriver::Postgres;
        config.database.pg.url = String::new();

        assert!(matches!(
            validate_configuration(&config),
            Err(ValidationError::EnvVarsError { errors }) if errors.contains("ISSUES_DATABASE_PG_URL")
        ));
    }

    #[test]
    fn test_missing_server_and_project() {
        let mut config = valid_config();
        config.server.bind_ip = String::new();
        config.server.bind_port = 0;
        config.default_project = String::new();

        let Err(ValidationError::EnvVarsError { errors }) = validate_configuration(&config) else {
            panic!("configuration should be invalid");
        };
        assert_eq!(errors.lines().filter(|l| !l.is_empty()).count(), 3);
    }
}
