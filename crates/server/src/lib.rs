//! Cartwheel Server - JSON API for the demo shop.
//!
//! Thin transport over [`cartwheel_core`]: every handler deserializes a
//! request, takes the shop lock, calls exactly one core operation, and wraps
//! the result in the `{success, message?, ...payload}` envelope the browser
//! client expects.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router, including middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
