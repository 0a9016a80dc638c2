//! The checkout workflow.
//!
//! Checkout is the only place that mutates more than one store, and it is
//! strictly validate-then-commit: steps 1-2 perform no mutation at all, so
//! any rejection leaves the cart, stock, ledger, and discount registry
//! exactly as they were. Stock is decremented only after the order is
//! appended (the commit point) - carts are long-lived and speculative, so
//! inventory is never blocked by items merely sitting in a cart.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartValidation;
use crate::discount::{CodeValidation, DiscountCode, apply_discount};
use crate::error::{Result, ShopError};
use crate::orders::{Order, OrderStatus};
use crate::shop::Shop;
use crate::types::{OrderId, UserId};

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order: Order,
    pub message: String,
    /// A freshly minted reward code, present only when this order's sequence
    /// number hit a multiple of the configured interval.
    pub new_discount_code: Option<DiscountCode>,
}

impl Shop {
    /// Check out the user's cart, optionally redeeming a discount code.
    ///
    /// Sequence: validate the cart against live stock, validate and price
    /// the code, append the order (advancing the order counter), mark the
    /// code used, decrement stock per line, clear the cart, and finally ask
    /// the reward rule whether the post-increment counter earns a new code.
    /// The reward belongs to the qualifying order itself: the Kth checkout
    /// receives the code when K is a multiple of the interval.
    ///
    /// # Errors
    ///
    /// [`ShopError::Rejected`] carrying the validation's own message when
    /// the cart or the code is rejected. No side effects in that case.
    pub fn checkout(
        &mut self,
        user_id: &UserId,
        discount_code: Option<&str>,
    ) -> Result<CheckoutReceipt> {
        let cart = match self.validate_cart(user_id) {
            CartValidation::Valid(view) => view,
            CartValidation::Invalid { message } => return Err(ShopError::Rejected(message)),
        };

        let (discount, final_amount, applied_code, percentage) = match discount_code {
            Some(code) => match self.validate_discount_code(code) {
                CodeValidation::Valid(record) => {
                    let (discount, final_amount) =
                        apply_discount(cart.subtotal, record.discount_percentage);
                    (
                        discount,
                        final_amount,
                        Some(record.code),
                        record.discount_percentage,
                    )
                }
                CodeValidation::Invalid { message, .. } => {
                    return Err(ShopError::Rejected(message));
                }
            },
            None => (Decimal::ZERO, cart.subtotal, None, Decimal::ZERO),
        };

        let order = Order {
            id: OrderId::generate(),
            user_id: user_id.clone(),
            items: cart.items.clone(),
            subtotal: cart.subtotal,
            discount,
            final_amount,
            discount_code: applied_code.clone(),
            discount_percentage: percentage,
            created_at: Utc::now(),
            status: OrderStatus::Completed,
        };

        // Commit point: from here on the order exists and the counter has
        // advanced.
        self.orders.append(order.clone());

        if let Some(code) = &applied_code {
            self.discounts.mark_used(code);
        }

        for item in &order.items {
            // Cannot fail: validated against live stock above, and nothing
            // else ran in between.
            self.catalog.decrement_stock(item.product_id, item.quantity)?;
        }

        self.clear_cart(user_id);

        let new_discount_code = self.generate_discount_code(self.orders.count());

        Ok(CheckoutReceipt {
            order,
            message: "Order placed successfully".to_string(),
            new_discount_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::discount::DiscountConfig;
    use crate::types::ProductId;

    fn shop_with_stock(stock: u32) -> Shop {
        let mut shop = Shop::new(DiscountConfig::default());
        shop.catalog.insert(Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            price: Decimal::from(1000),
            stock,
        });
        shop
    }

    fn alice() -> UserId {
        UserId::new("alice")
    }

    #[test]
    fn empty_cart_checkout_has_no_side_effects() {
        let mut shop = shop_with_stock(10);
        let err = shop.checkout(&alice(), None).expect_err("empty cart");
        assert_eq!(err, ShopError::Rejected("Cart is empty".to_string()));
        assert_eq!(shop.orders.count(), 0);
        assert_eq!(shop.catalog.get(ProductId::new(1)).map(|p| p.stock), Some(10));
    }

    #[test]
    fn checkout_without_code_charges_the_subtotal() {
        let mut shop = shop_with_stock(10);
        shop.add_item(&alice(), ProductId::new(1), 2).expect("add");

        let receipt = shop.checkout(&alice(), None).expect("checkout");
        assert_eq!(receipt.order.subtotal, Decimal::from(2000));
        assert_eq!(receipt.order.final_amount, Decimal::from(2000));
        assert_eq!(receipt.order.discount, Decimal::ZERO);
        assert_eq!(receipt.order.discount_code, None);
        assert_eq!(receipt.order.status, OrderStatus::Completed);
        assert_eq!(receipt.message, "Order placed successfully");
    }

    #[test]
    fn checkout_commits_stock_cart_and_ledger() {
        let mut shop = shop_with_stock(10);
        shop.add_item(&alice(), ProductId::new(1), 2).expect("add");
        let receipt = shop.checkout(&alice(), None).expect("checkout");

        assert_eq!(shop.orders.count(), 1);
        assert!(shop.orders.get(receipt.order.id).is_some());
        assert_eq!(shop.catalog.get(ProductId::new(1)).map(|p| p.stock), Some(8));
        assert_eq!(shop.get_cart(&alice()).total_items, 0);
    }

    #[test]
    fn committed_order_is_immune_to_later_cart_activity() {
        let mut shop = shop_with_stock(10);
        shop.add_item(&alice(), ProductId::new(1), 2).expect("add");
        let receipt = shop.checkout(&alice(), None).expect("checkout");

        shop.add_item(&alice(), ProductId::new(1), 5).expect("add again");

        let committed = shop.orders.get(receipt.order.id).expect("order exists");
        assert_eq!(committed.items.len(), 1);
        assert_eq!(committed.items[0].quantity, 2);
    }

    #[test]
    fn stale_stock_rejects_the_whole_checkout() {
        let mut shop = shop_with_stock(5);
        shop.add_item(&alice(), ProductId::new(1), 4).expect("add");
        // Stock dropped between add and checkout.
        shop.catalog.insert(Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            price: Decimal::from(1000),
            stock: 2,
        });

        let err = shop.checkout(&alice(), None).expect_err("stale stock");
        assert_eq!(
            err,
            ShopError::Rejected("Insufficient stock for Laptop. Available: 2".to_string())
        );
        // Nothing moved: no order, stock and cart untouched.
        assert_eq!(shop.orders.count(), 0);
        assert_eq!(shop.catalog.get(ProductId::new(1)).map(|p| p.stock), Some(2));
        assert_eq!(shop.get_cart(&alice()).total_items, 4);
    }

    #[test]
    fn valid_code_discounts_and_is_consumed() {
        let mut shop = shop_with_stock(10);
        let code = shop.generate_discount_code(5).expect("code");

        shop.add_item(&alice(), ProductId::new(1), 2).expect("add");
        let receipt = shop
            .checkout(&alice(), Some(&code.code))
            .expect("checkout with code");

        assert_eq!(receipt.order.subtotal, Decimal::from(2000));
        assert_eq!(receipt.order.discount, Decimal::from(200));
        assert_eq!(receipt.order.final_amount, Decimal::from(1800));
        assert_eq!(receipt.order.discount_code.as_deref(), Some(code.code.as_str()));
        assert_eq!(receipt.order.discount_percentage, Decimal::from(10));

        let record = shop.discounts.get(&code.code).expect("still registered");
        assert!(record.used);
        assert!(record.used_at.is_some());
    }

    #[test]
    fn used_code_rejects_checkout_without_side_effects() {
        let mut shop = shop_with_stock(10);
        let code = shop.generate_discount_code(5).expect("code");
        shop.discounts.mark_used(&code.code);

        shop.add_item(&alice(), ProductId::new(1), 1).expect("add");
        let err = shop
            .checkout(&alice(), Some(&code.code))
            .expect_err("used code");
        assert_eq!(
            err,
            ShopError::Rejected("Discount code has already been used".to_string())
        );
        assert_eq!(shop.orders.count(), 0);
        assert_eq!(shop.get_cart(&alice()).total_items, 1);
    }

    #[test]
    fn unknown_code_rejects_checkout() {
        let mut shop = shop_with_stock(10);
        shop.add_item(&alice(), ProductId::new(1), 1).expect("add");
        let err = shop
            .checkout(&alice(), Some("SAVE10-BOGUS123"))
            .expect_err("unknown code");
        assert_eq!(err, ShopError::Rejected("Invalid discount code".to_string()));
    }

    #[test]
    fn every_nth_checkout_earns_a_reward() {
        let mut shop = shop_with_stock(100);
        let nth = shop.config.nth_order;

        let mut rewards = Vec::new();
        for i in 0..nth {
            let user = UserId::new(format!("user-{i}"));
            shop.add_item(&user, ProductId::new(1), 1).expect("add");
            let receipt = shop.checkout(&user, None).expect("checkout");
            rewards.push(receipt.new_discount_code);
        }

        let (last, earlier) = rewards.split_last().expect("ran at least one");
        assert!(earlier.iter().all(Option::is_none));
        let reward = last.as_ref().expect("nth order earns a code");
        assert_eq!(reward.order_number, nth);
        assert!(!reward.used);
        assert!(shop.discounts.get(&reward.code).is_some());
    }
}
