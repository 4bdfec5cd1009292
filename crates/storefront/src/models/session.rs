//! Session-related types.
//!
//! Keys for the data the storefront keeps in each cookie session.

/// Session keys for cart data.
pub mod keys {
    /// Key for storing the cart registry key (UUID).
    pub const CART_KEY: &str = "cart_key";
}
