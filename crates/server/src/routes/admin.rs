//! Admin route handlers: manual code minting and read-only reporting.
//!
//! The demo has no authentication (an explicit non-goal), so these routes
//! are as open as the rest of the API.

use axum::Json;
use axum::extract::State;
use cartwheel_core::{DiscountCode, Order, ShopError, StoreStats};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Body for manual discount generation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDiscountRequest {
    pub order_number: i64,
}

/// Envelope for manual discount generation. `discount_code` is null when
/// the order number does not hit the reward interval.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDiscountResponse {
    pub success: bool,
    pub discount_code: Option<DiscountCode>,
}

/// Envelope for the statistics report.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StoreStats,
}

/// Envelope for the discount code listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCodeListResponse {
    pub success: bool,
    pub discount_codes: Vec<DiscountCode>,
}

/// Envelope for the full order listing.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// Mint a discount code for an arbitrary order number. Returns a null code
/// (not an error) when the number does not qualify, mirroring the reward
/// rule at checkout.
#[instrument(skip(state))]
pub async fn generate_discount(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<GenerateDiscountRequest>,
) -> Result<Json<GenerateDiscountResponse>> {
    let order_number = u64::try_from(body.order_number).map_err(|_| {
        ShopError::InvalidArgument("Order number must be a positive integer".to_string())
    })?;
    let discount_code = state.shop().generate_discount_code(order_number);
    Ok(Json(GenerateDiscountResponse {
        success: true,
        discount_code,
    }))
}

/// Aggregated statistics over orders and codes.
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.shop().stats();
    Json(StatsResponse {
        success: true,
        stats,
    })
}

/// Every discount code ever generated, newest first.
#[instrument(skip(state))]
pub async fn discount_codes(State(state): State<AppState>) -> Json<DiscountCodeListResponse> {
    let discount_codes = state.shop().discounts.list();
    Json(DiscountCodeListResponse {
        success: true,
        discount_codes,
    })
}

/// Every order, oldest first.
#[instrument(skip(state))]
pub async fn orders(State(state): State<AppState>) -> Json<OrderListResponse> {
    let orders = state.shop().orders.list().to_vec();
    Json(OrderListResponse {
        success: true,
        orders,
    })
}
