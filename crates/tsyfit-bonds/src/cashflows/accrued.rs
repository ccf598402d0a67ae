//! Accrued interest under the Actual/Actual Treasury convention.

use tsyfit_core::daycounts::actual_days;
use tsyfit_core::types::{Date, Frequency};

use crate::cashflows::schedule::CouponPeriod;
use crate::error::{BondError, BondResult};

/// An accrued-interest calculation with its day-count inputs.
///
/// The intermediate fields are part of the result so callers can
/// display or audit the accrual without recomputing day counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccruedInterest {
    /// Accrued interest in currency units.
    pub accrued: f64,
    /// Actual days in the full coupon period.
    pub days_in_period: i64,
    /// Actual days from the last coupon to the reference date.
    pub days_accrued: i64,
    /// `days_accrued / days_in_period`.
    pub accrual_fraction: f64,
    /// The full coupon payment for the period, in currency units.
    pub coupon_payment: f64,
}

/// Computes accrued interest within a coupon period.
///
/// Actual/Actual: `accrued = coupon_payment * days_accrued /
/// days_in_period` with exact calendar day counts on both sides.
///
/// A reference date outside `[last_coupon, next_coupon)` is an
/// explicit error rather than a zero result, so "no accrual because
/// the date is outside the period" stays distinguishable from "accrual
/// computed as exactly zero" (a reference date on the coupon date).
///
/// # Errors
///
/// `OutsideAccrualPeriod` when `reference` is not inside the period;
/// `InvalidSpec` for a zero-frequency period or a degenerate
/// (zero-day) period.
pub fn accrued_interest(
    period: &CouponPeriod,
    reference: Date,
    coupon_rate_decimal: f64,
    frequency: Frequency,
    face_value: f64,
) -> BondResult<AccruedInterest> {
    if frequency.is_zero() {
        return Err(BondError::invalid_spec(
            "accrued interest undefined for zero-coupon frequency",
        ));
    }
    if reference < period.last_coupon || reference >= period.next_coupon {
        return Err(BondError::OutsideAccrualPeriod {
            reference: reference.to_string(),
            last_coupon: period.last_coupon.to_string(),
            next_coupon: period.next_coupon.to_string(),
        });
    }

    let days_in_period = actual_days(period.last_coupon, period.next_coupon)?;
    let days_accrued = actual_days(period.last_coupon, reference)?;
    if days_in_period == 0 {
        return Err(BondError::invalid_spec(format!(
            "degenerate coupon period at {}",
            period.last_coupon
        )));
    }

    let accrual_fraction = days_accrued as f64 / days_in_period as f64;
    let coupon_payment =
        coupon_rate_decimal / f64::from(frequency.periods_per_year()) * face_value;

    Ok(AccruedInterest {
        accrued: coupon_payment * accrual_fraction,
        days_in_period,
        days_accrued,
        accrual_fraction,
        coupon_payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn period() -> CouponPeriod {
        CouponPeriod {
            last_coupon: date(2025, 8, 15),
            next_coupon: date(2026, 2, 15),
        }
    }

    #[test]
    fn test_concrete_treasury_scenario() {
        // 4% semi-annual note, face 100, settled 2025-11-19
        let ai = accrued_interest(
            &period(),
            date(2025, 11, 19),
            0.04,
            Frequency::SemiAnnual,
            100.0,
        )
        .unwrap();

        assert_eq!(ai.days_in_period, 184);
        assert_eq!(ai.days_accrued, 96);
        assert_relative_eq!(ai.accrual_fraction, 96.0 / 184.0, epsilon = 1e-12);
        assert_relative_eq!(ai.coupon_payment, 2.0, epsilon = 1e-12);
        assert_relative_eq!(ai.accrued, 2.0 * 96.0 / 184.0, epsilon = 1e-12);
        assert!((ai.accrued - 1.0435).abs() < 1e-4);
    }

    #[test]
    fn test_zero_accrual_on_coupon_date() {
        let ai = accrued_interest(
            &period(),
            date(2025, 8, 15),
            0.04,
            Frequency::SemiAnnual,
            100.0,
        )
        .unwrap();

        assert_eq!(ai.days_accrued, 0);
        assert_relative_eq!(ai.accrued, 0.0);
    }

    #[test]
    fn test_outside_period_is_explicit_error() {
        // Before the period start
        let before = accrued_interest(
            &period(),
            date(2025, 8, 1),
            0.04,
            Frequency::SemiAnnual,
            100.0,
        );
        assert!(matches!(
            before,
            Err(BondError::OutsideAccrualPeriod { .. })
        ));

        // On the next coupon date (belongs to the following period)
        let on_next = accrued_interest(
            &period(),
            date(2026, 2, 15),
            0.04,
            Frequency::SemiAnnual,
            100.0,
        );
        assert!(matches!(
            on_next,
            Err(BondError::OutsideAccrualPeriod { .. })
        ));
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let result = accrued_interest(
            &period(),
            date(2025, 11, 19),
            0.04,
            Frequency::Zero,
            100.0,
        );
        assert!(matches!(result, Err(BondError::InvalidSpec { .. })));
    }

    proptest! {
        #[test]
        fn prop_accrued_bounded_by_coupon_payment(offset in 0i64..183) {
            // At every date inside the period, 0 <= AI <= full coupon
            let p = period();
            let reference = p.last_coupon.add_days(offset);

            let ai = accrued_interest(
                &p,
                reference,
                0.04,
                Frequency::SemiAnnual,
                100.0,
            ).unwrap();

            prop_assert!(ai.accrued >= 0.0);
            prop_assert!(ai.accrued <= ai.coupon_payment);
            prop_assert!((0.0..1.0).contains(&ai.accrual_fraction));
        }
    }
}
