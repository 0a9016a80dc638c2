//! Per-user shopping carts.
//!
//! A cart line snapshots the product's name and price at add-time, so later
//! catalog price changes never retroactively alter an existing line. Stock is
//! checked when a line is added or updated AND re-checked at validation time:
//! carts are long-lived and stock may have moved meanwhile. This is
//! optimistic checking, not a reservation - stock is only decremented at
//! checkout commit.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::money::{line_total, round2};
use crate::shop::Shop;
use crate::types::{ProductId, UserId};

/// One line of a cart. `name` and `price` are add-time snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// A user's cart: an ordered sequence of lines, unique by product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

impl Cart {
    fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }

    fn line(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }
}

/// The cart store: carts keyed by user, created lazily on first access.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: HashMap<UserId, Cart>,
}

impl CartStore {
    /// Get the user's cart, creating an empty one on first access.
    pub fn get_or_insert(&mut self, user_id: &UserId) -> &mut Cart {
        self.carts
            .entry(user_id.clone())
            .or_insert_with(|| Cart::new(user_id.clone()))
    }

    /// Get the user's cart if one exists.
    #[must_use]
    pub fn get(&self, user_id: &UserId) -> Option<&Cart> {
        self.carts.get(user_id)
    }

    /// Reset the user's cart to an empty item list. Irreversible.
    pub fn clear(&mut self, user_id: &UserId) {
        if let Some(cart) = self.carts.get_mut(user_id) {
            cart.items.clear();
        }
    }
}

/// What the caller sees after any cart operation: the lines plus recomputed
/// totals. `subtotal` is rounded to 2 decimals at the point of reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub subtotal: Decimal,
}

/// Outcome of the pre-checkout cart validation.
///
/// Expected business rejections (empty cart, stale stock) are a variant the
/// caller branches on, not a signaled error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartValidation {
    /// The cart is ready to check out.
    Valid(CartView),
    /// The cart cannot be checked out; `message` says why.
    Invalid { message: String },
}

impl Shop {
    /// Add `quantity` units of a product to the user's cart.
    ///
    /// Merges into an existing line for the same product; the merged total
    /// must not exceed current stock. A new line snapshots the product's
    /// current name and price.
    ///
    /// # Errors
    ///
    /// [`ShopError::InvalidArgument`] if `quantity` is not positive,
    /// [`ShopError::NotFound`] if the product does not exist, and
    /// [`ShopError::InsufficientStock`] if the merged quantity exceeds stock.
    pub fn add_item(
        &mut self,
        user_id: &UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartView> {
        let quantity = positive_quantity(quantity)?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| ShopError::NotFound("Product not found".to_string()))?
            .clone();

        let in_cart = self
            .carts
            .get(user_id)
            .and_then(|c| c.line(product_id))
            .map_or(0, |line| line.quantity);
        if u64::from(in_cart) + u64::from(quantity) > u64::from(product.stock) {
            return Err(ShopError::InsufficientStock {
                name: product.name,
                available: product.stock,
            });
        }

        let cart = self.carts.get_or_insert(user_id);
        if let Some(line) = cart.line_mut(product_id) {
            line.quantity += quantity;
        } else {
            cart.items.push(CartItem {
                product_id,
                name: product.name,
                price: product.price,
                quantity,
            });
        }
        Ok(self.get_cart(user_id))
    }

    /// Set the quantity of an existing cart line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// [`ShopError::InvalidArgument`] if `quantity` is negative,
    /// [`ShopError::NotFound`] if the line (or its product) does not exist,
    /// and [`ShopError::InsufficientStock`] if the new quantity exceeds
    /// current stock.
    pub fn update_item(
        &mut self,
        user_id: &UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartView> {
        if quantity < 0 {
            return Err(ShopError::InvalidArgument(
                "Quantity cannot be negative".to_string(),
            ));
        }
        let in_cart = self
            .carts
            .get(user_id)
            .and_then(|c| c.line(product_id))
            .is_some();
        if !in_cart {
            return Err(ShopError::NotFound("Item not found in cart".to_string()));
        }

        if quantity == 0 {
            let cart = self.carts.get_or_insert(user_id);
            cart.items.retain(|i| i.product_id != product_id);
            return Ok(self.get_cart(user_id));
        }

        let quantity = positive_quantity(quantity)?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| ShopError::NotFound("Product not found".to_string()))?;
        if quantity > product.stock {
            return Err(ShopError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }

        let cart = self.carts.get_or_insert(user_id);
        if let Some(line) = cart.line_mut(product_id) {
            line.quantity = quantity;
        }
        Ok(self.get_cart(user_id))
    }

    /// Remove a cart line entirely. Equivalent to `update_item(.., 0)`.
    ///
    /// # Errors
    ///
    /// [`ShopError::NotFound`] if the line does not exist.
    pub fn remove_item(&mut self, user_id: &UserId, product_id: ProductId) -> Result<CartView> {
        self.update_item(user_id, product_id, 0)
    }

    /// The user's cart with recomputed totals. Lazily creates an empty view
    /// for a user never seen before.
    #[must_use]
    pub fn get_cart(&self, user_id: &UserId) -> CartView {
        let items = self
            .carts
            .get(user_id)
            .map(|c| c.items.clone())
            .unwrap_or_default();
        let total_items = items.iter().map(|i| i.quantity).sum();
        let subtotal = round2(
            items
                .iter()
                .map(|i| line_total(i.price, i.quantity))
                .sum::<Decimal>(),
        );
        CartView {
            user_id: user_id.clone(),
            items,
            total_items,
            subtotal,
        }
    }

    /// Empty the user's cart.
    pub fn clear_cart(&mut self, user_id: &UserId) {
        self.carts.clear(user_id);
    }

    /// Read-only pre-checkout check: the cart must be non-empty and every
    /// line's quantity must still fit the product's *current* stock.
    #[must_use]
    pub fn validate_cart(&self, user_id: &UserId) -> CartValidation {
        let view = self.get_cart(user_id);
        if view.items.is_empty() {
            return CartValidation::Invalid {
                message: "Cart is empty".to_string(),
            };
        }
        for item in &view.items {
            let available = self.catalog.get(item.product_id).map_or(0, |p| p.stock);
            if item.quantity > available {
                return CartValidation::Invalid {
                    message: format!(
                        "Insufficient stock for {}. Available: {available}",
                        item.name
                    ),
                };
            }
        }
        CartValidation::Valid(view)
    }
}

fn positive_quantity(quantity: i64) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            ShopError::InvalidArgument("Quantity must be a positive integer".to_string())
        })
}
