//! Application state shared across handlers.

use std::sync::Arc;

use crate::carts::CartRegistry;
use crate::config::StorefrontConfig;
use crate::services::newsletter::{NewsletterClient, NewsletterError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the cart registry, and the newsletter client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    carts: CartRegistry,
    newsletter: NewsletterClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the newsletter HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, NewsletterError> {
        let newsletter = NewsletterClient::new(config.klaviyo.as_ref())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                carts: CartRegistry::new(),
                newsletter,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the session cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }

    /// Get a reference to the newsletter subscription client.
    #[must_use]
    pub fn newsletter(&self) -> &NewsletterClient {
        &self.inner.newsletter
    }
}
