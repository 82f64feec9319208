//! Conversions between integer cents and major-unit amounts.
//!
//! Cents are the canonical representation inside the domain. Major units only
//! appear at the boundaries: the JSON wire format and the SQLite `amount`
//! column.

pub const CENTS_PER_UNIT: i64 = 100;

/// Convert a wire amount (e.g. `12.50`) to cents, truncating toward zero.
///
/// Returns `None` for non-finite amounts and for amounts whose cent value
/// does not fit in an `i64`. The sign is not checked here; `Expense` rejects
/// non-positive amounts.
pub fn cents_from_major_units(amount: f64) -> Option<i64> {
    let scaled = amount * CENTS_PER_UNIT as f64;
    if !scaled.is_finite() || scaled <= i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return None;
    }
    Some(scaled as i64)
}

pub fn major_units_from_cents(cents: i64) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

/// Convert a persisted major-unit amount back to cents.
///
/// Stored values were written as `cents / 100`, so rounding recovers the exact
/// cent count where truncation would lose one on values like `0.29`.
pub fn cents_from_stored_major_units(amount: f64) -> i64 {
    (amount * CENTS_PER_UNIT as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_amount_truncates_toward_zero() {
        assert_eq!(cents_from_major_units(1500.0), Some(150000));
        assert_eq!(cents_from_major_units(85.0), Some(8500));
        assert_eq!(cents_from_major_units(12.999), Some(1299));
        assert_eq!(cents_from_major_units(-0.019), Some(-1));
        assert_eq!(cents_from_major_units(0.001), Some(0));
    }

    #[test]
    fn test_unrepresentable_wire_amount_is_rejected() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e300, 9.3e16] {
            assert_eq!(cents_from_major_units(amount), None, "amount {} should not convert", amount);
        }
        assert_eq!(cents_from_major_units(1e16), Some(1_000_000_000_000_000_000));
    }

    #[test]
    fn test_major_units_from_cents() {
        assert_eq!(major_units_from_cents(150000), 1500.0);
        assert_eq!(major_units_from_cents(8500), 85.0);
        assert_eq!(major_units_from_cents(1), 0.01);
    }

    #[test]
    fn test_round_trip_through_major_units() {
        let amount = major_units_from_cents(150000);
        assert_eq!(cents_from_major_units(amount), Some(150000));
    }

    #[test]
    fn test_stored_amount_recovers_exact_cents() {
        // 0.29 * 100 is 28.999999999999996 in binary floating point
        assert_eq!(cents_from_major_units(0.29), Some(28));
        assert_eq!(cents_from_stored_major_units(0.29), 29);
        assert_eq!(cents_from_stored_major_units(major_units_from_cents(1234567)), 1234567);
    }
}
