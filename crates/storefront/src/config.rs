//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `QUICKCART_CATALOG_URL` - Product listing endpoint
//!   (default: `https://api.escuelajs.co/api/v1/products`)
//! - `QUICKCART_DATA_DIR` - Directory for persisted session state
//!   (default: `.quickcart`)
//! - `QUICKCART_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default public product listing endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.escuelajs.co/api/v1/products";

/// Default directory for persisted session state.
pub const DEFAULT_DATA_DIR: &str = ".quickcart";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Product listing endpoint.
    pub catalog_url: Url,
    /// Directory holding the persisted key-value store.
    pub data_dir: PathBuf,
    /// Timeout applied to catalog requests.
    pub http_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_env_or_default("QUICKCART_CATALOG_URL", DEFAULT_CATALOG_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("QUICKCART_CATALOG_URL".to_string(), e.to_string())
            })?;
        let data_dir = PathBuf::from(get_env_or_default("QUICKCART_DATA_DIR", DEFAULT_DATA_DIR));
        let http_timeout = get_env_or_default(
            "QUICKCART_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("QUICKCART_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            catalog_url,
            data_dir,
            http_timeout,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // The default endpoint is a compile-time constant and always parses
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid"),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog_url.as_str(), DEFAULT_CATALOG_URL);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_catalog_url_parses() {
        assert!(Url::parse(DEFAULT_CATALOG_URL).is_ok());
    }
}
