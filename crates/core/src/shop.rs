//! The [`Shop`] aggregate: every in-memory store behind one handle.
//!
//! The stores are plain fields rather than globals so tests can construct
//! isolated shops and poke at state directly (e.g. lowering stock between an
//! add and a checkout). Component operations live in `impl Shop` blocks in
//! their own modules: cart operations in [`crate::cart`], discount operations
//! in [`crate::discount`], the checkout workflow in [`crate::checkout`], and
//! statistics in [`crate::stats`]. Each public operation is a single `&mut
//! self` call, so multi-store mutations can never be observed half-done.

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::discount::{DiscountConfig, DiscountRegistry};
use crate::orders::OrderLedger;

/// All mutable state of the demo shop.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    /// Products, prices, and live stock.
    pub catalog: Catalog,
    /// Per-user carts, created lazily on first access.
    pub carts: CartStore,
    /// Every discount code ever generated, used or not.
    pub discounts: DiscountRegistry,
    /// Completed orders and the global order counter.
    pub orders: OrderLedger,
    /// The nth-order reward rule.
    pub config: DiscountConfig,
}

impl Shop {
    /// Create a shop with an empty catalog.
    #[must_use]
    pub fn new(config: DiscountConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a shop seeded with the demo catalog.
    #[must_use]
    pub fn with_demo_catalog(config: DiscountConfig) -> Self {
        Self {
            catalog: Catalog::demo(),
            config,
            ..Self::default()
        }
    }

    /// Clear all carts, discount codes, and orders (including the order
    /// counter). The catalog and configuration are left in place.
    ///
    /// For test isolation; nothing in the serving path calls this.
    pub fn reset(&mut self) {
        self.carts = CartStore::default();
        self.discounts = DiscountRegistry::default();
        self.orders = OrderLedger::default();
    }
}
