//! Test harness for Venture Couture integration tests.
//!
//! Spawns the real storefront application on an ephemeral port with short
//! checkout delays and hands tests a cookie-holding HTTP client, so every
//! test drives its own isolated session.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use venture_couture_storefront::config::{CheckoutTiming, StorefrontConfig};
use venture_couture_storefront::routes;
use venture_couture_storefront::state::AppState;

/// Simulated gateway latency used by the test server.
pub const PROCESSING_MS: u64 = 100;

/// Confirmation display time used by the test server.
pub const CONFIRMATION_MS: u64 = 200;

/// A running storefront instance plus a client with its own cookie jar.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second client with a fresh cookie jar (a separate session).
    #[must_use]
    pub fn new_session(&self) -> reqwest::Client {
        new_client()
    }
}

fn new_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap()
}

/// Spawn the storefront on an ephemeral port.
///
/// # Panics
///
/// Panics if the server fails to bind or the state fails to build.
pub async fn spawn_app() -> TestApp {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        checkout: CheckoutTiming {
            processing: Duration::from_millis(PROCESSING_MS),
            confirmation: Duration::from_millis(CONFIRMATION_MS),
        },
        klaviyo: None,
    };

    let state = AppState::new(config).unwrap();
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: new_client(),
    }
}
