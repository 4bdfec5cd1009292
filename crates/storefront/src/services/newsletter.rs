//! Klaviyo-backed newsletter subscription client.
//!
//! The storefront's only external collaborator: the newsletter endpoint
//! hands it an email address and it performs the actual subscription side
//! effect against the Klaviyo API. Without configured credentials the
//! client runs disabled and subscriptions are logged only, which is the
//! development default.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use venture_couture_core::Email;

use crate::config::KlaviyoConfig;

/// Klaviyo API version.
const API_REVISION: &str = "2024-10-15";

/// Klaviyo API base URL.
const BASE_URL: &str = "https://a.klaviyo.com/api";

/// Errors that can occur when subscribing an address.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Client error: {0}")]
    Client(String),
}

/// Newsletter subscription client.
#[derive(Debug, Clone)]
pub struct NewsletterClient {
    backend: Option<KlaviyoBackend>,
}

#[derive(Debug, Clone)]
struct KlaviyoBackend {
    client: reqwest::Client,
    list_id: String,
}

impl NewsletterClient {
    /// Create a new client.
    ///
    /// With `config` absent the client is disabled: subscriptions succeed
    /// without any network call and only leave a log line.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: Option<&KlaviyoConfig>) -> Result<Self, NewsletterError> {
        let Some(config) = config else {
            return Ok(Self { backend: None });
        };

        let mut headers = HeaderMap::new();

        let auth_value = format!("Klaviyo-API-Key {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| NewsletterError::Client(format!("Invalid API key format: {e}")))?,
        );

        // Revision header for API versioning
        headers.insert("revision", HeaderValue::from_static(API_REVISION));

        // Content-Type for JSON:API
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/vnd.api+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            backend: Some(KlaviyoBackend {
                client,
                list_id: config.list_id.clone(),
            }),
        })
    }

    /// Whether a Klaviyo backend is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Subscribe an email address to the newsletter list.
    ///
    /// Creates or updates a profile with marketing consent and attaches it
    /// to the configured list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn subscribe_email(&self, email: &Email) -> Result<(), NewsletterError> {
        let Some(backend) = &self.backend else {
            tracing::info!(%email, "Newsletter backend disabled; subscription logged only");
            return Ok(());
        };

        let url = format!("{BASE_URL}/profile-subscription-bulk-create-jobs");

        let body = serde_json::json!({
            "data": {
                "type": "profile-subscription-bulk-create-job",
                "attributes": {
                    "custom_source": "Venture Couture Website",
                    "profiles": {
                        "data": [{
                            "type": "profile",
                            "attributes": {
                                "email": email.as_str(),
                                "subscriptions": {
                                    "email": {
                                        "marketing": {
                                            "consent": "SUBSCRIBED"
                                        }
                                    }
                                }
                            }
                        }]
                    }
                },
                "relationships": {
                    "list": {
                        "data": {
                            "type": "list",
                            "id": backend.list_id
                        }
                    }
                }
            }
        });

        let response = backend.client.post(&url).json(&body).send().await?;
        let status = response.status();

        // 202 Accepted is the expected response for bulk jobs
        if !status.is_success() && status.as_u16() != 202 {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsletterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
