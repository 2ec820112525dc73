use std::{future::Future, str::FromStr};

use issues_config::Config;
use sentry::{integrations::debug_images::DebugImagesIntegration, types::Dsn, ClientOptions};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SentryError {
    #[error("Invalid Sentry DSN '{}',\n  caused by: {}", url, source)]
    InvalidDsn {
        url: String,
        source: sentry::types::ParseDsnError,
    },
}

fn client_options(config: &Config) -> Result<ClientOptions, SentryError> {
    let mut options = ClientOptions::new().add_integration(DebugImagesIntegration::default());

    options.dsn = Some(
        Dsn::from_str(&config.sentry.url).map_err(|e| SentryError::InvalidDsn {
            url: config.sentry.url.clone(),
            source: e,
        })?,
    );
    options.default_integrations = true;
    options.in_app_exclude.push("actix");
    options.in_app_exclude.push("sentry");
    options.in_app_exclude.push("tokio");
    options.release = Some(config.version.clone().into());
    options.attach_stacktrace = true;
    options.traces_sample_rate = config.sentry.traces_sample_rate;

    Ok(options)
}

/// Configure Sentry integration by wrapping a function.
///
/// The integration stays disabled when no Sentry URL is configured.
pub async fn with_sentry_configuration<T, Fut, E>(config: &Config, func: T) -> Result<(), E>
where
    T: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: From<SentryError>,
{
    let _guard = if config.sentry.url.is_empty() {
        None
    } else {
        let options = client_options(config)?;
        info!("Sentry integration enabled.");

        // Enable backtraces
        std::env::set_var("RUST_BACKTRACE", "1");

        Some(sentry::init(options))
    };

    func().await
}

#[cfg(test)]
mod tests {
    use issues_config::Config;

    use super::*;

    #[test]
    fn reject_invalid_dsn() {
        let mut config = Config::from_env_no_version().unwrap();
        config.sentry.url = "not a dsn".into();

        assert!(matches!(
            client_options(&config),
            Err(SentryError::InvalidDsn { url, .. }) if url == "not a dsn"
        ));
    }

    #[test]
    fn valid_dsn() {
        let mut config = Config::from_env_no_version().unwrap();
        config.sentry.url = "https://public@sentry.example.com/1".into();
        config.sentry.traces_sample_rate = 0.5;

        let options = client_options(&config).unwrap();
        assert!(options.dsn.is_some());
        assert_eq!(options.traces_sample_rate, 0.5);
    }

    #[tokio::test]
    async fn disabled_without_url() {
        let mut config = Config::from_env_no_version().unwrap();
        config.sentry.url = String::new();

        let result: Result<(), SentryError> =
            with_sentry_configuration(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }
}
