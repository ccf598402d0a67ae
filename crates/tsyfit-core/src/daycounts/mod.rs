//! Day-count utilities.
//!
//! Two distinct conventions are kept deliberately separate:
//!
//! - [`actual_days`]: exact Actual day counts, used for accrued
//!   interest fractions (the US Treasury Actual/Actual convention).
//! - [`curve_term`]: the `days / 365.25` approximation, used uniformly
//!   for curve-fitting terms on both market data and model evaluation.
//!
//! A correction to one must not silently alter the other, so callers
//! pick the function matching their use rather than a shared helper.

use crate::error::CoreResult;
use crate::types::Date;

/// Average days per year used for curve-fitting term calculations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Exact Actual day count from `start` to `end`.
///
/// # Errors
///
/// Returns `CoreError::InvalidDateRange` if `end` precedes `start`.
/// The function is only defined for forward periods.
pub fn actual_days(start: Date, end: Date) -> CoreResult<i64> {
    start.checked_days_between(&end)
}

/// Term in years from `reference` to `target` as `days / 365.25`.
///
/// An approximation, not Actual/Actual ICMA; acceptable for curve
/// fitting because it is applied consistently to both the market
/// observations and the model evaluation. May be negative when
/// `target` precedes `reference`; the curve model guards terms at a
/// small positive epsilon.
#[must_use]
pub fn curve_term(reference: Date, target: Date) -> f64 {
    reference.days_between(&target) as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use proptest::prelude::*;

    #[test]
    fn test_actual_days_forward() {
        let start = Date::from_ymd(2025, 8, 15).unwrap();
        let end = Date::from_ymd(2026, 2, 15).unwrap();
        assert_eq!(actual_days(start, end).unwrap(), 184);
    }

    #[test]
    fn test_actual_days_reversed_fails() {
        let start = Date::from_ymd(2026, 2, 15).unwrap();
        let end = Date::from_ymd(2025, 8, 15).unwrap();
        assert!(matches!(
            actual_days(start, end),
            Err(CoreError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_curve_term() {
        let reference = Date::from_ymd(2025, 1, 1).unwrap();
        let ten_years = Date::from_ymd(2035, 1, 1).unwrap();

        let term = curve_term(reference, ten_years);
        assert!((term - 10.0).abs() < 0.01);

        // Backward targets produce negative terms
        assert!(curve_term(ten_years, reference) < 0.0);
    }

    proptest! {
        #[test]
        fn prop_actual_days_defined_only_forward(
            offset_a in 0i64..20_000,
            offset_b in 0i64..20_000,
        ) {
            let base = Date::from_ymd(1990, 1, 1).unwrap();
            let d1 = base.add_days(offset_a);
            let d2 = base.add_days(offset_b);

            if d1 <= d2 {
                prop_assert_eq!(actual_days(d1, d2).unwrap(), offset_b - offset_a);
            } else {
                prop_assert!(actual_days(d1, d2).is_err());
            }
        }
    }
}
