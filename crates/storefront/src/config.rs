//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: http://localhost:3000)
//! - `CHECKOUT_PROCESSING_MS` - Simulated payment latency (default: 2000)
//! - `CHECKOUT_CONFIRMATION_MS` - Confirmation display time before the cart
//!   resets (default: 3000)
//! - `KLAVIYO_API_KEY` - Klaviyo private API key (newsletter subscriptions)
//! - `KLAVIYO_LIST_ID` - Klaviyo newsletter list ID
//!
//! The Klaviyo variables must be set together; with neither set the
//! newsletter service runs disabled and subscriptions are only logged.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Public base URL for the storefront
    pub base_url: String,
    /// Checkout flow timing
    pub checkout: CheckoutTiming,
    /// Klaviyo newsletter configuration, if enabled
    pub klaviyo: Option<KlaviyoConfig>,
}

/// Delays driving the simulated payment flow.
///
/// The defaults reproduce the production storefront: two seconds of
/// simulated gateway latency, then three seconds of confirmation before the
/// cart clears and the checkout closes. Tests shorten both.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutTiming {
    /// Submit -> complete latency (stand-in for a payment round-trip).
    pub processing: Duration,
    /// Complete -> cart-reset delay (confirmation display time).
    pub confirmation: Duration,
}

impl Default for CheckoutTiming {
    fn default() -> Self {
        Self {
            processing: Duration::from_millis(2000),
            confirmation: Duration::from_millis(3000),
        }
    }
}

/// Klaviyo newsletter API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct KlaviyoConfig {
    /// Klaviyo private API key
    pub api_key: SecretString,
    /// Newsletter list ID
    pub list_id: String,
}

impl std::fmt::Debug for KlaviyoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlaviyoConfig")
            .field("api_key", &"[REDACTED]")
            .field("list_id", &self.list_id)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable, or if
    /// the Klaviyo variables are only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let checkout = CheckoutTiming::from_env()?;
        let klaviyo = KlaviyoConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            checkout,
            klaviyo,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CheckoutTiming {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            processing: Duration::from_millis(get_millis("CHECKOUT_PROCESSING_MS", 2000)?),
            confirmation: Duration::from_millis(get_millis("CHECKOUT_CONFIRMATION_MS", 3000)?),
        })
    }
}

impl KlaviyoConfig {
    /// Both variables set: enabled. Neither set: disabled. One set: error,
    /// since that is almost certainly a deployment mistake.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let api_key = get_optional_env("KLAVIYO_API_KEY");
        let list_id = get_optional_env("KLAVIYO_LIST_ID");

        match (api_key, list_id) {
            (Some(api_key), Some(list_id)) => Ok(Some(Self {
                api_key: SecretString::from(api_key),
                list_id,
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar("KLAVIYO_LIST_ID".to_string())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar("KLAVIYO_API_KEY".to_string())),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a millisecond duration variable, falling back to a default.
fn get_millis(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_timing_defaults() {
        let timing = CheckoutTiming::default();
        assert_eq!(timing.processing, Duration::from_millis(2000));
        assert_eq!(timing.confirmation, Duration::from_millis(3000));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            checkout: CheckoutTiming::default(),
            klaviyo: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_klaviyo_config_debug_redacts_api_key() {
        let config = KlaviyoConfig {
            api_key: SecretString::from("pk_super_secret_value"),
            list_id: "AbC123".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("AbC123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("pk_super_secret_value"));
    }
}
