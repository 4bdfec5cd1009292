//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Cart (session-scoped, JSON snapshots)
//! GET  /cart                   - Cart snapshot
//! POST /cart/add               - Add item (merges on id + size)
//! POST /cart/update            - Update quantity (0 removes)
//! POST /cart/remove            - Remove item
//! POST /cart/clear             - Clear cart
//! POST /cart/toggle            - Toggle cart drawer
//!
//! # Checkout
//! GET  /checkout               - Checkout view (phase, method, order)
//! POST /checkout/open          - Show checkout view
//! POST /checkout/close         - Hide checkout view, cancel pending payment
//! POST /checkout/method        - Select payment method
//! POST /checkout/submit        - Submit payment (202, or 409 if in flight)
//!
//! # Newsletter
//! POST /newsletter/subscribe   - Subscribe an email address (202)
//! ```
//!
//! Every mutating cart route answers with the fresh snapshot, so clients
//! observe the new state synchronously after dispatch.

pub mod cart;
pub mod checkout;
pub mod newsletter;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/toggle", post(cart::toggle))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/open", post(checkout::open))
        .route("/close", post(checkout::close))
        .route("/method", post(checkout::select_method))
        .route("/submit", post(checkout::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/newsletter/subscribe", post(newsletter::subscribe))
}

/// Build the complete application: routes, session layer, and state.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes().layer(session_layer).with_state(state)
}
