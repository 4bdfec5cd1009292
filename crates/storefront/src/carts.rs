//! Session-scoped cart storage.
//!
//! Each browser session owns one cart: the session cookie stores a cart key
//! (UUID) that maps into an in-memory registry. Every [`SessionCart`]
//! serializes its mutations behind a mutex, so the derived-field invariant
//! of the cart state holds under concurrent requests.
//!
//! Nothing here persists: carts live for the lifetime of the process, which
//! matches the session-scoped contract of the cart store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tower_sessions::Session;
use uuid::Uuid;

use venture_couture_core::{CartAction, CartState};

use crate::checkout::CheckoutFlow;
use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

/// Registry of live carts, keyed by the UUID stored in each session.
#[derive(Debug, Default)]
pub struct CartRegistry {
    carts: Mutex<HashMap<Uuid, Arc<SessionCart>>>,
}

impl CartRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cart by key, creating it if absent.
    #[must_use]
    pub fn get_or_insert(&self, key: Uuid) -> Arc<SessionCart> {
        let mut carts = self
            .carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(carts.entry(key).or_default())
    }

    /// Number of live carts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the registry holds no carts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One session's cart plus its checkout flow state.
///
/// The cart mutex is the single writer lock required for the derived-field
/// invariant; the checkout flow has its own lock so the simulated payment
/// task never holds both at once.
#[derive(Debug, Default)]
pub struct SessionCart {
    cart: Mutex<CartState>,
    pub(crate) flow: Mutex<CheckoutFlow>,
}

impl SessionCart {
    /// Apply a cart action and return the resulting snapshot.
    ///
    /// Consumers observe the new state synchronously: the snapshot is taken
    /// under the same lock acquisition that applied the action.
    pub fn dispatch(&self, action: CartAction) -> CartState {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        cart.apply(action);
        cart.clone()
    }

    /// Read-only snapshot of the current cart state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Resolve the cart for the current session, creating one on first touch.
///
/// The cart key is stored in the session cookie the same way the cart
/// identifier of an external commerce backend would be.
///
/// # Errors
///
/// Returns an error if the session store rejects the read or write.
pub async fn session_cart(state: &AppState, session: &Session) -> Result<Arc<SessionCart>> {
    let key = match session.get::<Uuid>(session_keys::CART_KEY).await? {
        Some(key) => key,
        None => {
            let key = Uuid::new_v4();
            session.insert(session_keys::CART_KEY, key).await?;
            key
        }
    };

    Ok(state.carts().get_or_insert(key))
}
