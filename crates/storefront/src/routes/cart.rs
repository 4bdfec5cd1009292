//! Cart route handlers.
//!
//! Each handler resolves the session's cart, dispatches one cart action,
//! and answers with the resulting read-only snapshot.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use venture_couture_core::{CartAction, CartItem, CartState};

use crate::carts::session_cart;
use crate::error::Result;
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    pub size: String,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub id: String,
    pub quantity: u32,
}

/// Remove item request body.
#[derive(Debug, Deserialize)]
pub struct RemoveItemForm {
    pub id: String,
}

/// Cart snapshot.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.snapshot()))
}

/// Add an item to the cart.
///
/// Merges with an existing `(id, size)` line by incrementing its quantity.
/// A missing or zero quantity is treated as one, matching the storefront's
/// add-to-cart buttons.
#[instrument(skip(state, session), fields(item_id = %form.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddItemForm>,
) -> Result<Json<CartState>> {
    let item = CartItem {
        id: form.id,
        name: form.name,
        price: form.price,
        sale_price: form.sale_price,
        size: form.size,
        quantity: form.quantity.unwrap_or(1).max(1),
    };

    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::AddItem(item))))
}

/// Update an item's quantity. Zero removes the item.
#[instrument(skip(state, session), fields(item_id = %form.id, quantity = form.quantity))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateQuantityForm>,
) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::UpdateQuantity {
        id: form.id,
        quantity: form.quantity,
    })))
}

/// Remove an item from the cart.
#[instrument(skip(state, session), fields(item_id = %form.id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RemoveItemForm>,
) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::RemoveItem { id: form.id })))
}

/// Empty the cart. Visibility flags are untouched.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::ClearCart)))
}

/// Toggle the cart drawer.
#[instrument(skip(state, session))]
pub async fn toggle(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let cart = session_cart(&state, &session).await?;
    Ok(Json(cart.dispatch(CartAction::ToggleCart)))
}
