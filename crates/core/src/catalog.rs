//! Product catalog: the source of truth for prices and stock.
//!
//! Products are read-only to the rest of the system except for the stock
//! decrement performed at checkout commit. Stock never goes below zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::types::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, non-negative, in the currency's standard unit.
    pub price: Decimal,
    /// Units available for sale.
    pub stock: u32,
}

/// Lookup of products by identifier, ordered by ID for stable listings.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A small fixed catalog for the demo storefront.
    #[must_use]
    pub fn demo() -> Self {
        let mut catalog = Self::new();
        for (id, name, price, stock) in [
            (1, "Laptop", Decimal::new(99_999, 2), 10),
            (2, "Smartphone", Decimal::new(69_999, 2), 15),
            (3, "Headphones", Decimal::new(19_999, 2), 20),
            (4, "Keyboard", Decimal::new(8_999, 2), 30),
            (5, "Monitor", Decimal::new(29_999, 2), 12),
        ] {
            catalog.insert(Product {
                id: ProductId::new(id),
                name: name.to_string(),
                price,
                stock,
            });
        }
        catalog
    }

    /// Add or replace a product.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// All products, ordered by ID.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Decrement a product's stock by `quantity` units.
    ///
    /// Called only at checkout commit, after the cart has been validated
    /// against live stock under the same operation.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::NotFound`] for an unknown product and
    /// [`ShopError::InsufficientStock`] if the decrement would take stock
    /// below zero.
    pub fn decrement_stock(&mut self, id: ProductId, quantity: u32) -> Result<()> {
        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| ShopError::NotFound("Product not found".to_string()))?;
        product.stock = product.stock.checked_sub(quantity).ok_or_else(|| {
            ShopError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            }
        })?;
        Ok(())
    }
}
