//! Checkout phase machine, payment methods, and order references.
//!
//! This module holds the pure half of the checkout flow: the phase
//! transitions (`Idle -> Processing -> Complete -> Idle`) and the data
//! captured at completion. The simulated payment latency and the
//! confirmation reset timer live in the storefront crate, which drives
//! these transitions.

use chrono::Utc;
use core::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported payment methods.
///
/// A fixed enumeration; selection is independent of the phase but is only
/// honored while the session is idle (see [`CheckoutSession::select_method`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit/debit card.
    #[default]
    Card,
    /// PayPal.
    Paypal,
    /// Ozow instant EFT.
    Ozow,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Ozow => "ozow",
        };
        write!(f, "{s}")
    }
}

/// Where a checkout session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutPhase {
    /// Waiting for the customer to submit.
    #[default]
    Idle,
    /// Simulated payment in flight; further submissions are rejected.
    Processing,
    /// Payment confirmed; showing the order confirmation.
    Complete,
}

/// Ephemeral checkout session state: selected method plus current phase.
///
/// Created when the checkout view opens and destroyed when it closes or
/// completes-and-resets. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutSession {
    method: PaymentMethod,
    phase: CheckoutPhase,
}

impl CheckoutSession {
    /// New idle session with the default payment method.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected payment method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Select a payment method.
    ///
    /// Honored only while idle; once a submission is in flight the change is
    /// ignored (not queued) so a method switch can never affect an in-flight
    /// payment. Returns whether the selection was applied.
    pub fn select_method(&mut self, method: PaymentMethod) -> bool {
        if self.phase == CheckoutPhase::Idle {
            self.method = method;
            true
        } else {
            false
        }
    }

    /// Submit the payment: `Idle -> Processing`.
    ///
    /// Returns `false` (and leaves the phase untouched) if a submission is
    /// already processing or complete, which is how double submissions are
    /// rejected.
    pub fn submit(&mut self) -> bool {
        if self.phase == CheckoutPhase::Idle {
            self.phase = CheckoutPhase::Processing;
            true
        } else {
            false
        }
    }

    /// Resolve the simulated payment: `Processing -> Complete`.
    ///
    /// There is no failure path; the simulation always succeeds.
    pub fn complete(&mut self) -> bool {
        if self.phase == CheckoutPhase::Processing {
            self.phase = CheckoutPhase::Complete;
            true
        } else {
            false
        }
    }

    /// Return to `Idle`, keeping the selected method.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Idle;
    }
}

/// Customer-facing order reference, e.g. `VC482913`.
///
/// Derived from the completion timestamp: `VC` plus the last six digits of
/// the Unix time in milliseconds. Not unique in any durable sense - there is
/// no order management behind it - but unique enough for a confirmation
/// screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderReference(String);

impl OrderReference {
    /// Build a reference from a Unix timestamp in milliseconds.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("VC{:06}", millis.rem_euclid(1_000_000)))
    }

    /// Build a reference from the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_timestamp_millis(Utc::now().timestamp_millis())
    }

    /// The reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confirmation data captured at the moment a payment completes.
///
/// The total is snapshotted here because the cart is cleared shortly after
/// completion; the confirmation keeps showing what was actually paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Generated order reference.
    pub reference: OrderReference,
    /// Cart total at completion.
    pub total: Decimal,
}
