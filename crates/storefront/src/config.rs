//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TIDEPOOL_HOST` - Bind address (default: 127.0.0.1)
//! - `TIDEPOOL_PORT` - Listen port (default: 3000)
//! - `TIDEPOOL_DATA_PATH` - JSON file holding all storefront records
//!   (default: tidepool-data.json)
//! - `TIDEPOOL_RETURN_PAGE` - Page a forced login resumes at (default: shop.html)
//! - `TIDEPOOL_CONTACT_ENDPOINT` - Hosted form endpoint for the contact form
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use tidepool_core::PageTarget;

/// Default location of the data file.
pub const DEFAULT_DATA_PATH: &str = "tidepool-data.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// File backing the storefront records
    pub data_path: PathBuf,
    /// Page a forced login resumes at
    pub return_page: PageTarget,
    /// Hosted form endpoint for contact messages
    pub contact_endpoint: Option<Url>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("TIDEPOOL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIDEPOOL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TIDEPOOL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIDEPOOL_PORT".to_string(), e.to_string()))?;
        let data_path = PathBuf::from(get_env_or_default("TIDEPOOL_DATA_PATH", DEFAULT_DATA_PATH));
        let return_page = PageTarget::new(get_env_or_default(
            "TIDEPOOL_RETURN_PAGE",
            PageTarget::DEFAULT_LANDING,
        ));
        let contact_endpoint = get_optional_url("TIDEPOOL_CONTACT_ENDPOINT")?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_sample_rate(&get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"))?;

        Ok(Self {
            host,
            port,
            data_path,
            return_page,
            contact_endpoint,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            return_page: PageTarget::default_landing(),
            contact_endpoint: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get an optional environment variable parsed as an absolute URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not a valid URL.
pub fn get_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|raw| Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())))
        .transpose()
}

fn parse_sample_rate(raw: &str) -> Result<f32, ConfigError> {
    let rate = raw.parse::<f32>().map_err(|e| {
        ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
    })?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            "SENTRY_SAMPLE_RATE".to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 8080,
            ..StorefrontConfig::default()
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_sample_rate() {
        assert!((parse_sample_rate("0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate("1.5").is_err());
        assert!(parse_sample_rate("often").is_err());
    }

    #[test]
    fn test_optional_url_unset() {
        assert!(get_optional_url("TIDEPOOL_TEST_DEFINITELY_UNSET").unwrap().is_none());
    }
}
