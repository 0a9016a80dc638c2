//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Health check
//!
//! # Catalog
//! GET    /api/products                  - Product listing
//! GET    /api/products/{id}             - Product detail (404 if absent)
//!
//! # Cart
//! GET    /api/cart/{userId}             - Cart view with totals
//! POST   /api/cart/add                  - Add item (merges existing lines)
//! PUT    /api/cart/update               - Set line quantity (0 removes)
//! DELETE /api/cart/remove               - Remove a line
//!
//! # Checkout
//! POST   /api/checkout                  - Place an order, maybe earn a code
//!
//! # Orders
//! GET    /api/orders/user/{userId}      - A user's order history
//! GET    /api/orders/{orderId}          - Order detail (404 if absent)
//!
//! # Admin
//! POST   /api/admin/generate-discount   - Mint a code for an order number
//! GET    /api/admin/stats               - Aggregated statistics
//! GET    /api/admin/discount-codes      - All codes, used and unused
//! GET    /api/admin/orders              - All orders
//! ```
//!
//! Every response carries the `{success, message?, ...payload}` envelope.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", put(cart::update))
        .route("/remove", delete(cart::remove))
        .route("/{user_id}", get(cart::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/user/{user_id}", get(orders::for_user))
        .route("/{order_id}", get(orders::show))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-discount", post(admin::generate_discount))
        .route("/stats", get(admin::stats))
        .route("/discount-codes", get(admin::discount_codes))
        .route("/orders", get(admin::orders))
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .nest("/orders", order_routes())
        .nest("/admin", admin_routes())
}
