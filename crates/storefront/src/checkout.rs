//! Checkout flow controller.
//!
//! Drives the simulated payment flow on top of a session's cart: submit
//! moves the pure phase machine from idle to processing, a tokio task waits
//! out the simulated gateway latency, records the confirmation, waits out
//! the confirmation display time, then clears the cart and closes the
//! checkout.
//!
//! Both delays run inside a single abortable task whose handle the flow
//! owns. Closing the checkout aborts the task, so no cart mutation can fire
//! after the view has been dismissed.

use std::sync::{Arc, PoisonError};

use serde::Serialize;
use tokio::task::AbortHandle;

use venture_couture_core::{
    CartAction, CartState, CheckoutPhase, CheckoutSession, OrderConfirmation, OrderReference,
    PaymentMethod,
};

use crate::carts::SessionCart;
use crate::config::CheckoutTiming;
use crate::error::{AppError, Result};

/// Checkout state for one session: the pure phase machine plus the
/// confirmation data and the handle of the in-flight payment task.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    session: CheckoutSession,
    confirmation: Option<OrderConfirmation>,
    task: Option<AbortHandle>,
}

impl Drop for CheckoutFlow {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// What the checkout view renders: phase, selected method, and the order
/// confirmation once the payment completes.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub phase: CheckoutPhase,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfirmation>,
    pub show_checkout: bool,
}

impl SessionCart {
    /// Current checkout view for this session.
    #[must_use]
    pub fn checkout_view(&self) -> CheckoutView {
        let show_checkout = self.snapshot().show_checkout();
        let flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        CheckoutView {
            phase: flow.session.phase(),
            method: flow.session.method(),
            order: flow.confirmation.clone(),
            show_checkout,
        }
    }

    /// Select a payment method.
    ///
    /// Ignored (with a log line) once a submission is in flight; the
    /// in-flight payment keeps the method it was submitted with.
    pub fn select_payment_method(&self, method: PaymentMethod) {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        if !flow.session.select_method(method) {
            tracing::debug!(%method, phase = ?flow.session.phase(), "Payment method change ignored");
        }
    }

    /// Submit the payment for this session's cart.
    ///
    /// Moves the phase to `Processing` and spawns the simulated payment
    /// task. After `timing.processing` the phase moves to `Complete` with an
    /// order reference and the cart total captured at that moment; after a
    /// further `timing.confirmation` the cart is cleared, the checkout view
    /// is closed, and the phase returns to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CheckoutInProgress`] if a submission is already
    /// processing or complete.
    pub fn submit_payment(
        self: &Arc<Self>,
        method: Option<PaymentMethod>,
        timing: CheckoutTiming,
    ) -> Result<CheckoutView> {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(method) = method {
            flow.session.select_method(method);
        }
        if !flow.session.submit() {
            return Err(AppError::CheckoutInProgress);
        }
        flow.confirmation = None;

        let method = flow.session.method();
        tracing::info!(%method, "Payment submitted");

        let cart = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timing.processing).await;

            // Capture the total before taking the flow lock; the two locks
            // are never held together.
            let total = cart.snapshot().total();
            {
                let mut flow = cart.flow.lock().unwrap_or_else(PoisonError::into_inner);
                if flow.session.complete() {
                    let reference = OrderReference::generate();
                    tracing::info!(%reference, %total, "Payment complete");
                    flow.confirmation = Some(OrderConfirmation { reference, total });
                }
            }

            tokio::time::sleep(timing.confirmation).await;

            cart.dispatch(CartAction::ClearCart);
            cart.dispatch(CartAction::CloseCheckout);

            let mut flow = cart.flow.lock().unwrap_or_else(PoisonError::into_inner);
            flow.session.reset();
            flow.confirmation = None;
            flow.task = None;
        });
        flow.task = Some(handle.abort_handle());

        drop(flow);
        Ok(self.checkout_view())
    }

    /// Close the checkout view.
    ///
    /// Cancels any pending payment task and returns the phase machine to
    /// idle before hiding the view, so nothing mutates the cart after
    /// dismissal. Cart contents are never touched by a close.
    pub fn close_checkout(&self) -> CartState {
        {
            let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(task) = flow.task.take() {
                task.abort();
                tracing::debug!("Pending payment task cancelled by checkout close");
            }
            flow.session.reset();
            flow.confirmation = None;
        }
        self.dispatch(CartAction::CloseCheckout)
    }
}
