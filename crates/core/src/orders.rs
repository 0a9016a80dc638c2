//! The append-only order ledger and the global order counter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::types::{OrderId, UserId};

/// Lifecycle status of an order. The demo has no fulfilment flow, so every
/// committed order is immediately `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
}

/// A committed order. Immutable once appended; `items` is a deep copy of the
/// cart lines at commit time, so later cart mutation cannot alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    /// Amount taken off the subtotal; zero when no code was applied.
    pub discount: Decimal,
    pub final_amount: Decimal,
    /// The redeemed code, if any.
    pub discount_code: Option<String>,
    /// The applied percentage; zero when no code was applied.
    pub discount_percentage: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Append-only collection of completed orders.
///
/// The counter is the commit point: it advances by exactly one per appended
/// order, never decrements, and drives the nth-order reward rule.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
    counter: u64,
}

impl OrderLedger {
    /// Append a committed order, advancing the order counter.
    pub fn append(&mut self, order: Order) {
        self.orders.push(order);
        self.counter += 1;
    }

    /// The global order counter: how many orders have ever been committed.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.counter
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// All orders, oldest first.
    #[must_use]
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    /// A user's orders, oldest first.
    #[must_use]
    pub fn list_for_user(&self, user_id: &UserId) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_for(user: &str) -> Order {
        Order {
            id: OrderId::generate(),
            user_id: UserId::new(user),
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            discount_code: None,
            discount_percentage: Decimal::ZERO,
            created_at: Utc::now(),
            status: OrderStatus::Completed,
        }
    }

    #[test]
    fn append_advances_the_counter_by_one() {
        let mut ledger = OrderLedger::default();
        assert_eq!(ledger.count(), 0);
        ledger.append(order_for("a"));
        ledger.append(order_for("b"));
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn lookup_by_id_and_by_user() {
        let mut ledger = OrderLedger::default();
        let order = order_for("alice");
        let id = order.id;
        ledger.append(order);
        ledger.append(order_for("bob"));

        assert!(ledger.get(id).is_some());
        assert!(ledger.get(OrderId::generate()).is_none());
        assert_eq!(ledger.list_for_user(&UserId::new("alice")).len(), 1);
        assert_eq!(ledger.list_for_user(&UserId::new("carol")).len(), 0);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Completed).expect("serialize");
        assert_eq!(json, "\"completed\"");
    }
}
