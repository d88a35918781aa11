//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64`; every sum is computed as `Decimal` and only
//! converted back, rounded to 2 places, at the edge.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert an `f64` to `Decimal` via its shortest round-trip representation
///
/// `50.005_f64` becomes exactly `50.005`, not the nearest binary fraction.
pub fn to_decimal(value: f64) -> Decimal {
    if !value.is_finite() {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or(Decimal::ZERO)
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert `Decimal` back to `f64`, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_money<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
        to_f64(amounts.into_iter().map(to_decimal).sum())
    }

    #[test]
    fn test_to_decimal_precision() {
        // 0.1 + 0.2 != 0.3 in f64
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(sum, Decimal::new(3, 1));
        assert_eq!(to_decimal(50.005), Decimal::new(50005, 3));
    }

    #[test]
    fn test_sum_rounds_half_away_from_zero() {
        assert_eq!(sum_money([100.00, 50.005]), 150.01);
        assert_eq!(sum_money([0.004]), 0.0);
        assert_eq!(sum_money([0.005]), 0.01);
        assert_eq!(sum_money([-0.005]), -0.01);
        assert_eq!(sum_money(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_many_small_amounts() {
        let total = sum_money(std::iter::repeat_n(0.01, 1000));
        assert_eq!(total, 10.0);
    }
}
