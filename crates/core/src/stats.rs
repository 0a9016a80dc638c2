//! On-demand store statistics.
//!
//! Purely derived from the order ledger and the discount registry; nothing
//! here is stored. An empty ledger yields all-zero sums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shop::Shop;

/// Discount code counts split by redemption state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCodeStats {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
}

/// Aggregated view over all orders and codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_orders: u64,
    /// Sum of line quantities across every order.
    pub total_items_purchased: u64,
    /// Sum of final amounts actually charged.
    pub total_revenue: Decimal,
    pub total_discount_given: Decimal,
    pub discount_codes: DiscountCodeStats,
}

impl Shop {
    /// Compute current statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let orders = self.orders.list();
        let total_items_purchased = orders
            .iter()
            .flat_map(|o| &o.items)
            .map(|i| u64::from(i.quantity))
            .sum();
        let total_revenue = orders.iter().map(|o| o.final_amount).sum();
        let total_discount_given = orders.iter().map(|o| o.discount).sum();

        let codes = self.discounts.list();
        let used = codes.iter().filter(|c| c.used).count();

        StoreStats {
            total_orders: self.orders.count(),
            total_items_purchased,
            total_revenue,
            total_discount_given,
            discount_codes: DiscountCodeStats {
                total: codes.len(),
                used,
                unused: codes.len() - used,
            },
        }
    }
}
