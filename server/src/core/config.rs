//! Application configuration
//!
//! Merged from environment variables and CLI flags (CLI wins). Upstream
//! credentials are injected here and carried as [`Secret`]s; nothing below
//! the configuration layer reads process environment directly.

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;

use super::cli::CliConfig;
use super::constants::{
    DEFAULT_CURRENCY, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEZONE, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET, ENV_DEFAULT_CURRENCY, ENV_DEVELOPER_TOKEN, ENV_HOST,
    ENV_LOGIN_CUSTOMER_ID, ENV_PORT, ENV_REFRESH_TOKEN, ENV_TIMEZONE,
};
use super::secret::Secret;

// =============================================================================
// Server
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// =============================================================================
// Google Ads credentials
// =============================================================================

#[derive(Debug, Clone)]
pub struct GoogleAdsConfig {
    pub developer_token: Secret,
    pub client_id: String,
    pub client_secret: Secret,
    pub refresh_token: Secret,
    pub login_customer_id: Option<String>,
}

// =============================================================================
// Reporting
// =============================================================================

#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// Fallback ISO 4217 code when an account declares no currency
    pub default_currency: String,
    /// Timezone for resolving relative date windows
    pub timezone: Tz,
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub google_ads: GoogleAdsConfig,
    pub reporting: ReportingConfig,
}

impl AppConfig {
    /// Load configuration from process environment plus CLI overrides.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] but with an injectable environment lookup.
    pub fn load_with(
        cli: &CliConfig,
        getenv: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let host = cli
            .host
            .clone()
            .or_else(|| getenv(ENV_HOST))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match (&cli.port, getenv(ENV_PORT)) {
            (Some(port), _) => *port,
            (None, Some(raw)) => raw
                .parse()
                .with_context(|| format!("{} is not a valid port: {}", ENV_PORT, raw))?,
            (None, None) => DEFAULT_PORT,
        };

        let google_ads = GoogleAdsConfig {
            developer_token: required_secret(&getenv, ENV_DEVELOPER_TOKEN)?,
            client_id: required(&getenv, ENV_CLIENT_ID)?,
            client_secret: required_secret(&getenv, ENV_CLIENT_SECRET)?,
            refresh_token: required_secret(&getenv, ENV_REFRESH_TOKEN)?,
            login_customer_id: cli
                .login_customer_id
                .clone()
                .or_else(|| getenv(ENV_LOGIN_CUSTOMER_ID))
                .filter(|v| !v.is_empty()),
        };

        let default_currency = cli
            .default_currency
            .clone()
            .or_else(|| getenv(ENV_DEFAULT_CURRENCY))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
            .trim()
            .to_ascii_uppercase();
        if default_currency.len() != 3 || !default_currency.bytes().all(|b| b.is_ascii_alphabetic())
        {
            bail!("default currency must be a 3-letter ISO 4217 code, got '{default_currency}'");
        }

        let timezone_name = cli
            .timezone
            .clone()
            .or_else(|| getenv(ENV_TIMEZONE))
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid timezone '{}': {}", timezone_name, e))?;

        Ok(Self {
            server: ServerConfig { host, port },
            google_ads,
            reporting: ReportingConfig {
                default_currency,
                timezone,
            },
        })
    }
}

fn required(getenv: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match getenv(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => bail!("missing required environment variable {}", key),
    }
}

fn required_secret(getenv: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Secret> {
    required(getenv, key).map(Secret::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with_credentials() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_DEVELOPER_TOKEN, "dev-token"),
            (ENV_CLIENT_ID, "client-id"),
            (ENV_CLIENT_SECRET, "client-secret"),
            (ENV_REFRESH_TOKEN, "refresh-token"),
        ])
    }

    fn lookup<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_applied() {
        let env = env_with_credentials();
        let config = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.reporting.default_currency, "USD");
        assert_eq!(config.reporting.timezone, chrono_tz::UTC);
        assert_eq!(config.google_ads.client_id, "client-id");
        assert!(config.google_ads.login_customer_id.is_none());
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut env = env_with_credentials();
        env.insert(ENV_HOST, "10.0.0.1");
        env.insert(ENV_PORT, "1111");

        let cli = CliConfig {
            host: Some("0.0.0.0".into()),
            port: Some(2222),
            ..Default::default()
        };
        let config = AppConfig::load_with(&cli, lookup(&env)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 2222);
    }

    #[test]
    fn test_missing_credentials_fail_with_var_name() {
        let mut env = env_with_credentials();
        env.remove(ENV_REFRESH_TOKEN);

        let err = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap_err();
        assert!(err.to_string().contains(ENV_REFRESH_TOKEN));
    }

    #[test]
    fn test_currency_normalized_and_validated() {
        let mut env = env_with_credentials();
        env.insert(ENV_DEFAULT_CURRENCY, "eur");
        let config = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap();
        assert_eq!(config.reporting.default_currency, "EUR");

        env.insert(ENV_DEFAULT_CURRENCY, "euros");
        assert!(AppConfig::load_with(&CliConfig::default(), lookup(&env)).is_err());
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let mut env = env_with_credentials();
        env.insert(ENV_TIMEZONE, "Mars/Olympus");
        let err = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_valid_timezone_accepted() {
        let mut env = env_with_credentials();
        env.insert(ENV_TIMEZONE, "Europe/Berlin");
        let config = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap();
        assert_eq!(config.reporting.timezone, chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_invalid_env_port_rejected() {
        let mut env = env_with_credentials();
        env.insert(ENV_PORT, "not-a-port");
        assert!(AppConfig::load_with(&CliConfig::default(), lookup(&env)).is_err());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let env = env_with_credentials();
        let config = AppConfig::load_with(&CliConfig::default(), lookup(&env)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("refresh-token"));
        assert!(!rendered.contains("client-secret"));
        assert!(rendered.contains("client-id"));
    }
}
