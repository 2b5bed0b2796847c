//! Money arithmetic helpers using rust_decimal for precision
//!
//! All monetary calculations are done in `Decimal` internally and converted
//! to `f64` only at the serialization boundary. Inputs arrive from live form
//! fields and fetched JSON, so conversion is defensive: non-finite values
//! degrade to zero instead of propagating NaN into totals.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Non-finite values (NaN, Infinity) log an error and return ZERO so a
/// half-typed form field can never corrupt a financial total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// Check if an amount covers what is required (with small tolerance)
///
/// Returns true if paid >= required - 0.01
pub fn is_covered(paid: f64, required: f64) -> bool {
    to_decimal(paid) >= to_decimal(required) - MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_non_finite_degrades_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(10825, 4)), 1.08); // 1.0825
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01); // 1.005
    }

    #[test]
    fn test_money_eq_tolerance() {
        assert!(money_eq(10.004, 10.0));
        assert!(!money_eq(10.02, 10.0));
    }

    #[test]
    fn test_is_covered() {
        assert!(is_covered(100.0, 100.0));
        assert!(is_covered(99.995, 100.0));
        assert!(!is_covered(99.9, 100.0));
    }
}
