//! Venture Couture Core - Shared domain library.
//!
//! This crate provides the domain model used across all Venture Couture
//! components:
//! - `storefront` - Public-facing storefront server
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients, no timers. The cart reducer and the checkout phase
//! machine live here; everything asynchronous (simulated payment latency,
//! confirmation reset) is layered on top in the storefront crate.
//!
//! # Modules
//!
//! - [`cart`] - Cart state, the action vocabulary, and the reducer
//! - [`checkout`] - Checkout phase machine, payment methods, order references
//! - [`types`] - Newtype wrappers for validated domain values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{CartAction, CartItem, CartState};
pub use checkout::{
    CheckoutPhase, CheckoutSession, OrderConfirmation, OrderReference, PaymentMethod,
};
pub use types::*;
