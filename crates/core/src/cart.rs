//! Cart state and the action vocabulary that mutates it.
//!
//! The cart store follows a reducer pattern: [`CartState`] owns the item
//! sequence and its derived fields, and the only way to mutate it is to
//! [`apply`](CartState::apply) a [`CartAction`]. Every action is a total
//! function over the state - nothing fails, unknown items are no-ops.
//!
//! Derived fields (`item_count`, `total`) are recomputed after every action
//! so they can never drift from the item sequence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single line in the cart.
///
/// Items are keyed by `(id, size)`: adding the same product in the same size
/// twice increments the existing line's quantity instead of appending a
/// duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Regular unit price.
    pub price: Decimal,
    /// Sale unit price; overrides `price` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    /// Size/variant label (e.g., "M", "XL").
    pub size: String,
    /// Quantity; always positive while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price the customer actually pays (sale price when on sale).
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    /// Effective price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.effective_price() * Decimal::from(self.quantity)
    }
}

/// The closed set of actions the cart store accepts.
///
/// Dispatched by the presentation layer; each variant corresponds to one
/// inbound route in the storefront crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Insert a new item, or merge quantities with an existing `(id, size)` line.
    AddItem(CartItem),
    /// Remove every line matching the identifier.
    RemoveItem {
        /// Product identifier.
        id: String,
    },
    /// Set the quantity of the matching line; zero removes it.
    UpdateQuantity {
        /// Product identifier.
        id: String,
        /// New quantity; `0` is equivalent to `RemoveItem`.
        quantity: u32,
    },
    /// Empty the item sequence. Visibility flags are untouched.
    ClearCart,
    /// Flip the cart drawer open/closed.
    ToggleCart,
    /// Show the checkout view.
    OpenCheckout,
    /// Hide the checkout view.
    CloseCheckout,
}

/// Authoritative cart contents and visibility flags.
///
/// Fields are private: reads go through the accessors (or the serialized
/// snapshot), writes go through [`apply`](CartState::apply). Serializes to
/// the read-only snapshot the presentation layer consumes:
/// `{items, item_count, total, cart_open, show_checkout}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    items: Vec<CartItem>,
    item_count: u32,
    total: Decimal,
    cart_open: bool,
    show_checkout: bool,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Sum of effective price times quantity over all items.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub const fn cart_open(&self) -> bool {
        self.cart_open
    }

    /// Whether the checkout view is showing.
    #[must_use]
    pub const fn show_checkout(&self) -> bool {
        self.show_checkout
    }

    /// Apply an action to the cart.
    ///
    /// Total over all `(state, action)` pairs: actions referencing unknown
    /// items do nothing, and a zero quantity is normalized to removal rather
    /// than rejected. Derived fields are recomputed before returning.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem(item) => self.add_item(item),
            CartAction::RemoveItem { id } => self.items.retain(|item| item.id != id),
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity == 0 {
                    self.items.retain(|item| item.id != id);
                } else {
                    for item in self.items.iter_mut().filter(|item| item.id == id) {
                        item.quantity = quantity;
                    }
                }
            }
            CartAction::ClearCart => self.items.clear(),
            CartAction::ToggleCart => self.cart_open = !self.cart_open,
            CartAction::OpenCheckout => self.show_checkout = true,
            CartAction::CloseCheckout => self.show_checkout = false,
        }
        self.recompute();
    }

    fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|line| line.id == item.id && line.size == item.size)
        {
            // Saturate so an extreme quantity can never wrap a line to zero.
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Recompute `item_count` and `total` from the item sequence.
    ///
    /// Runs after every action, visibility toggles included; keeping the
    /// invariant unconditional is cheaper than reasoning about which actions
    /// can affect it.
    fn recompute(&mut self) {
        self.item_count = self
            .items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity));
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }
}
