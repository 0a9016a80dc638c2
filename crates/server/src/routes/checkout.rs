//! Checkout route handler.

use axum::Json;
use axum::extract::State;
use cartwheel_core::{CheckoutReceipt, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Body for the checkout operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: String,
    /// Optional discount code to redeem against the cart subtotal.
    pub discount_code: Option<String>,
}

/// Envelope for a successful checkout: the committed order, a confirmation
/// message, and - on every nth order - a freshly earned reward code.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
}

/// Place an order from the user's cart.
#[instrument(skip(state), fields(user_id = %body.user_id))]
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let receipt = state
        .shop()
        .checkout(&UserId::new(body.user_id), body.discount_code.as_deref())?;

    if let Some(code) = &receipt.new_discount_code {
        tracing::info!(code = %code.code, order_number = code.order_number, "reward code minted");
    }

    Ok(Json(CheckoutResponse {
        success: true,
        receipt,
    }))
}
