//! Cart route handlers.
//!
//! Mutations take `{userId, productId, quantity}` bodies and return the
//! recomputed cart view, so the client never has to re-fetch after a change.

use axum::Json;
use axum::extract::State;
use cartwheel_core::{CartView, ProductId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Body for add/update operations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutation {
    pub user_id: String,
    pub product_id: i32,
    pub quantity: i64,
}

/// Body for the remove operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRemoval {
    pub user_id: String,
    pub product_id: i32,
}

/// Envelope for cart responses.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: CartView,
}

impl CartResponse {
    fn ok(cart: CartView) -> Json<Self> {
        Json(Self {
            success: true,
            cart,
        })
    }
}

/// View a user's cart. Lazily empty for a user never seen before.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Json<CartResponse> {
    let cart = state.shop().get_cart(&UserId::new(user_id));
    CartResponse::ok(cart)
}

/// Add a quantity of a product to a cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CartMutation>,
) -> Result<Json<CartResponse>> {
    let cart = state.shop().add_item(
        &UserId::new(body.user_id),
        ProductId::new(body.product_id),
        body.quantity,
    )?;
    Ok(CartResponse::ok(cart))
}

/// Set a cart line's quantity. Zero removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CartMutation>,
) -> Result<Json<CartResponse>> {
    let cart = state.shop().update_item(
        &UserId::new(body.user_id),
        ProductId::new(body.product_id),
        body.quantity,
    )?;
    Ok(CartResponse::ok(cart))
}

/// Remove a line from a cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CartRemoval>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .shop()
        .remove_item(&UserId::new(body.user_id), ProductId::new(body.product_id))?;
    Ok(CartResponse::ok(cart))
}
