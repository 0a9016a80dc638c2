//! Cartwheel Server - JSON API for the demo shop.
//!
//! Serves the product catalog, per-user carts, checkout, and the nth-order
//! loyalty discount mechanism on port 3000 (configurable). All state is in
//! memory and lost on restart; this is a demo, not a store of record.

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwheel_server::config::ServerConfig;
use cartwheel_server::state::AppState;
use cartwheel_core::Shop;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build application state around the seeded demo shop
    let shop = Shop::with_demo_catalog(config.discount);
    tracing::info!(
        products = shop.catalog.len(),
        nth_order = config.discount.nth_order,
        "demo catalog seeded"
    );
    let state = AppState::new(config.clone(), shop);

    let app = cartwheel_server::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("cartwheel listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
