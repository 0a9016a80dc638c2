//! Catalog route handlers.

use axum::Json;
use axum::extract::State;
use cartwheel_core::{Product, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::extract::ApiPath;
use crate::state::AppState;

/// Envelope for the product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// Envelope for a single product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<ProductListResponse> {
    let products = state.shop().catalog.list();
    Json(ProductListResponse {
        success: true,
        products,
    })
}

/// Fetch one product by ID. 404 if absent.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ProductResponse>> {
    let product = state
        .shop()
        .catalog
        .get(ProductId::new(id))
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}
