//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use cartwheel_core::Shop;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The core [`Shop`] sits behind a single
/// mutex that each handler holds for the whole of one core operation; this
/// is the per-operation mutual exclusion that closes the validate-then-
/// decrement races the in-memory core otherwise has under parallel
/// execution. Operations are short, pure in-memory computations, so the
/// coarse lock is not a throughput concern for a demo.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create a new application state around an already-built shop.
    #[must_use]
    pub fn new(config: ServerConfig, shop: Shop) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Lock the shop for one operation.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder panicked while mutating the shop; state
    /// would be unreliable past that point, so poisoning is fatal.
    #[must_use]
    pub fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner.shop.lock().expect("shop lock poisoned")
    }
}
