//! Two-decimal currency arithmetic.
//!
//! All amounts are [`Decimal`] in the currency's standard unit (dollars, not
//! cents). Totals are computed exactly and rounded once at the point of
//! reporting, so no rounding error accumulates across lines.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to 2 decimal places using half-up rounding.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total for a quantity of a unit price, unrounded.
#[must_use]
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round2(Decimal::new(10005, 3)), Decimal::new(1001, 2)); // 10.005 -> 10.01
        assert_eq!(round2(Decimal::new(10004, 3)), Decimal::new(1000, 2)); // 10.004 -> 10.00
    }

    #[test]
    fn leaves_short_scales_alone() {
        assert_eq!(round2(Decimal::from(2000)), Decimal::from(2000));
    }

    #[test]
    fn line_total_multiplies_exactly() {
        assert_eq!(
            line_total(Decimal::new(1999, 2), 3),
            Decimal::new(5997, 2) // 19.99 * 3
        );
    }
}
