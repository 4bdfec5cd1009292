//! Checkout route handlers.
//!
//! Open/close map straight onto cart actions; submit and method selection
//! go through the checkout flow controller so phase rules apply.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use venture_couture_core::{CartAction, CartState, PaymentMethod};

use crate::carts::session_cart;
use crate::checkout::CheckoutView;
use crate::error::Result;
use crate::state::AppState;

/// Payment method selection request body.
#[derive(Debug, Deserialize)]
pub struct SelectMethodForm {
    pub method: PaymentMethod,
}

/// Payment submission request body.
///
/// The method is optional: when present it is applied before submission,
/// otherwise the session's current selection is used.
#[derive(Debug, Deserialize, Default)]
pub struct SubmitPaymentForm {
    #[serde(default)]
    pub method: Option<PaymentMethod>,
}

/// Checkout view: phase, selected method, and order confirmation if any.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.checkout_view()))
}

/// Show the checkout view.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::OpenCheckout)))
}

/// Hide the checkout view.
///
/// Also cancels a pending simulated payment, so a dismissed checkout can
/// never clear the cart afterwards.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.close_checkout()))
}

/// Select the payment method.
///
/// Ignored while a submission is in flight; the response shows the method
/// actually in effect.
#[instrument(skip(state, session))]
pub async fn select_method(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SelectMethodForm>,
) -> Result<Json<CheckoutView>> {
    let cart = session_cart(&state, &session).await?;
    cart.select_payment_method(form.method);
    Ok(Json(cart.checkout_view()))
}

/// Submit the payment.
///
/// Answers 202 Accepted with the processing view, or 409 Conflict if a
/// submission is already in flight for this session.
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SubmitPaymentForm>,
) -> Result<(StatusCode, Json<CheckoutView>)> {
    let cart = session_cart(&state, &session).await?;
    let view = cart.submit_payment(form.method, state.config().checkout)?;
    Ok((StatusCode::ACCEPTED, Json(view)))
}
