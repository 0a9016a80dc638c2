//! Discount codes and the nth-order reward rule.
//!
//! Every order whose 1-based sequence number is a multiple of the configured
//! interval mints a new percentage-off code. Codes are bearer tokens: anyone
//! presenting the string may redeem it, regardless of who earned it. A code
//! is single-use; marking it used is terminal and irreversible. There is no
//! expiry or revocation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::round2;
use crate::shop::Shop;

/// A generated discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Unique code string, e.g. `SAVE10-3F9A1C2B`.
    pub code: String,
    /// Percentage off, 0-100.
    pub discount_percentage: Decimal,
    pub generated_at: DateTime<Utc>,
    /// Whether the code has been redeemed. Terminal once true.
    pub used: bool,
    pub used_at: Option<DateTime<Utc>>,
    /// The order count that triggered generation. Informational only; it is
    /// never cross-checked at redemption.
    pub order_number: u64,
}

/// The nth-order reward configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountConfig {
    /// Every `nth_order`th order earns a code. Must be positive.
    pub nth_order: u64,
    /// Percentage off carried by generated codes.
    pub discount_percentage: Decimal,
}

impl Default for DiscountConfig {
    /// Every 5th order earns 10% off.
    fn default() -> Self {
        Self {
            nth_order: 5,
            discount_percentage: Decimal::from(10),
        }
    }
}

/// All codes ever generated, keyed by code string. Codes are never deleted.
#[derive(Debug, Clone, Default)]
pub struct DiscountRegistry {
    codes: HashMap<String, DiscountCode>,
}

impl DiscountRegistry {
    /// Look up a code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&DiscountCode> {
        self.codes.get(code)
    }

    /// Store a freshly generated code.
    pub fn insert(&mut self, code: DiscountCode) {
        self.codes.insert(code.code.clone(), code);
    }

    /// Mark a code as used, stamping the redemption time. No-op for an
    /// unknown code: it is only ever called after validation succeeded
    /// within the same operation.
    pub fn mark_used(&mut self, code: &str) {
        if let Some(record) = self.codes.get_mut(code) {
            record.used = true;
            record.used_at = Some(Utc::now());
        }
    }

    /// All codes, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<DiscountCode> {
        let mut codes: Vec<DiscountCode> = self.codes.values().cloned().collect();
        codes.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        codes
    }
}

/// Outcome of validating a presented discount code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeValidation {
    /// The code is known and unused; the full record is returned.
    Valid(DiscountCode),
    /// The code cannot be applied. For an already-used code, `used_at`
    /// carries the original redemption time.
    Invalid {
        message: String,
        used_at: Option<DateTime<Utc>>,
    },
}

impl Shop {
    /// Mint a reward code if `order_number` is a multiple of the configured
    /// interval; otherwise `None` (not an error).
    ///
    /// Uniqueness comes from the UUID-derived suffix; collision is treated
    /// as practically impossible.
    pub fn generate_discount_code(&mut self, order_number: u64) -> Option<DiscountCode> {
        if order_number == 0 || order_number % self.config.nth_order != 0 {
            return None;
        }
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        let code = DiscountCode {
            code: format!("SAVE{}-{suffix}", self.config.discount_percentage),
            discount_percentage: self.config.discount_percentage,
            generated_at: Utc::now(),
            used: false,
            used_at: None,
            order_number,
        };
        self.discounts.insert(code.clone());
        Some(code)
    }

    /// Validate a presented code: it must be non-empty, known, and unused.
    #[must_use]
    pub fn validate_discount_code(&self, code: &str) -> CodeValidation {
        if code.trim().is_empty() {
            return CodeValidation::Invalid {
                message: "Discount code is required".to_string(),
                used_at: None,
            };
        }
        match self.discounts.get(code) {
            None => CodeValidation::Invalid {
                message: "Invalid discount code".to_string(),
                used_at: None,
            },
            Some(record) if record.used => CodeValidation::Invalid {
                message: "Discount code has already been used".to_string(),
                used_at: record.used_at,
            },
            Some(record) => CodeValidation::Valid(record.clone()),
        }
    }
}

/// Compute the discount and final amount for a percentage off `amount`.
///
/// Both values are rounded to 2 decimals independently so that each is
/// correct to the cent on its own; they are not derived from each other.
#[must_use]
pub fn apply_discount(amount: Decimal, percentage: Decimal) -> (Decimal, Decimal) {
    let discount = round2(amount * percentage / Decimal::from(100));
    let final_amount = round2(amount - amount * percentage / Decimal::from(100));
    (discount, final_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> Shop {
        Shop::new(DiscountConfig::default())
    }

    #[test]
    fn generates_only_on_multiples_of_the_interval() {
        let mut shop = shop();
        assert!(shop.generate_discount_code(4).is_none());
        assert!(shop.generate_discount_code(5).is_some());
        assert!(shop.generate_discount_code(6).is_none());
        assert!(shop.generate_discount_code(10).is_some());
        assert!(shop.generate_discount_code(0).is_none());
    }

    #[test]
    fn generated_codes_are_unique_and_unused() {
        let mut shop = shop();
        let a = shop.generate_discount_code(5).expect("multiple of 5");
        let b = shop.generate_discount_code(10).expect("multiple of 5");
        assert_ne!(a.code, b.code);
        assert!(!a.used);
        assert!(a.used_at.is_none());
        assert_eq!(a.order_number, 5);
        assert!(a.code.starts_with("SAVE10-"));
    }

    #[test]
    fn empty_code_is_required() {
        let shop = shop();
        for presented in ["", "   "] {
            assert_eq!(
                shop.validate_discount_code(presented),
                CodeValidation::Invalid {
                    message: "Discount code is required".to_string(),
                    used_at: None,
                }
            );
        }
    }

    #[test]
    fn unknown_code_is_invalid() {
        let shop = shop();
        assert_eq!(
            shop.validate_discount_code("SAVE10-DEADBEEF"),
            CodeValidation::Invalid {
                message: "Invalid discount code".to_string(),
                used_at: None,
            }
        );
    }

    #[test]
    fn a_code_validates_exactly_once() {
        let mut shop = shop();
        let code = shop.generate_discount_code(5).expect("code");
        assert!(matches!(
            shop.validate_discount_code(&code.code),
            CodeValidation::Valid(_)
        ));

        shop.discounts.mark_used(&code.code);

        // Every later attempt reports "already used" with the original stamp.
        for _ in 0..3 {
            match shop.validate_discount_code(&code.code) {
                CodeValidation::Invalid { message, used_at } => {
                    assert_eq!(message, "Discount code has already been used");
                    assert!(used_at.is_some());
                }
                CodeValidation::Valid(_) => panic!("used code validated"),
            }
        }
    }

    #[test]
    fn mark_used_on_unknown_code_is_a_noop() {
        let mut shop = shop();
        shop.discounts.mark_used("SAVE10-NOPE");
        assert!(shop.discounts.list().is_empty());
    }

    #[test]
    fn apply_discount_rounds_each_value_independently() {
        let (discount, final_amount) =
            apply_discount(Decimal::from(100), Decimal::from(10));
        assert_eq!(discount, Decimal::from(10));
        assert_eq!(final_amount, Decimal::from(90));

        // 99.99 at 15%: discount 14.9985 -> 15.00, final 84.9915 -> 84.99
        let (discount, final_amount) =
            apply_discount(Decimal::new(9999, 2), Decimal::from(15));
        assert_eq!(discount, Decimal::new(1500, 2));
        assert_eq!(final_amount, Decimal::new(8499, 2));
    }

    #[test]
    fn listing_returns_every_generated_code() {
        let mut shop = shop();
        shop.generate_discount_code(5);
        shop.generate_discount_code(10);
        assert_eq!(shop.discounts.list().len(), 2);
    }
}
