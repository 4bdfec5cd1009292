//! Newsletter subscription route handlers.
//!
//! Validates the address with the core `Email` type and hands it to the
//! external subscription service.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use venture_couture_core::Email;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Newsletter subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Subscription acknowledgement.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub email: Email,
    pub subscribed: bool,
}

/// Subscribe to the newsletter.
///
/// Answers 202 Accepted once the subscription service has taken the
/// address; the client clears its input field on success.
#[instrument(skip(state), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(form): Json<SubscribeForm>,
) -> Result<(StatusCode, Json<SubscribeResponse>)> {
    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("Invalid email address: {e}")))?;

    state.newsletter().subscribe_email(&email).await?;
    tracing::info!(%email, "Newsletter subscription accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(SubscribeResponse {
            email,
            subscribed: true,
        }),
    ))
}
