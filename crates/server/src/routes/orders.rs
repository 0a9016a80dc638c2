//! Order lookup route handlers.

use axum::Json;
use axum::extract::State;
use cartwheel_core::{Order, OrderId, UserId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::extract::ApiPath;
use crate::state::AppState;

/// Envelope for a single order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Envelope for an order listing.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// Fetch one order by ID. 404 if absent (or if the ID is not a valid order
/// ID at all - an unparseable ID can't name an existing order).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(order_id): ApiPath<String>,
) -> Result<Json<OrderResponse>> {
    let not_found = || ApiError::NotFound("Order not found".to_string());
    let id = OrderId::parse(&order_id).map_err(|_| not_found())?;
    let order = state.shop().orders.get(id).cloned().ok_or_else(not_found)?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// A user's order history, oldest first.
#[instrument(skip(state))]
pub async fn for_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Json<OrderListResponse> {
    let orders = state.shop().orders.list_for_user(&UserId::new(user_id));
    Json(OrderListResponse {
        success: true,
        orders,
    })
}
