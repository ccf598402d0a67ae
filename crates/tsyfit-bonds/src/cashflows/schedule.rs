//! Coupon schedule generation.
//!
//! Coupon dates are generated by anchored month-stepping: every step
//! is taken from the anchor date by a cumulative month count, with the
//! anchor day clamped to the destination month. Stepping this way
//! (rather than from the previous generated date) keeps a month-end
//! anchor from drifting to shorter days over long schedules.

use log::trace;

use tsyfit_core::types::Date;

use crate::error::{BondError, BondResult, PeriodBound};
use crate::types::SecurityRecord;

/// Safety bound on generated coupon periods (~150 years at
/// semi-annual). Exceeding it signals corrupt security metadata.
pub const MAX_PERIODS: usize = 300;

/// The coupon period enclosing a reference date.
///
/// Invariant: `last_coupon <= reference < next_coupon`, with
/// `next_coupon` exactly one payment period after `last_coupon` under
/// the security's frequency (month-end clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponPeriod {
    /// Most recent coupon date at or before the reference date.
    pub last_coupon: Date,
    /// First coupon date strictly after the reference date.
    pub next_coupon: Date,
}

/// Generates the security's coupon dates around a reference date.
///
/// Dates are walked forward from the resolved first coupon
/// ([`SecurityRecord::resolve_first_coupon`]: the feed-supplied date,
/// or one payment period after the issue date) to maturity; this
/// represents irregular first periods anchored at the real first
/// coupon. When `reference` precedes the first coupon, theoretical
/// prior dates are synthesized backward so an enclosing period exists
/// for settlement during the initial (dated-date) period.
///
/// The returned dates are strictly increasing and always end at the
/// maturity date.
///
/// # Errors
///
/// `ScheduleOverflow` past [`MAX_PERIODS`] generated periods;
/// `InvalidSpec` for zero-coupon securities.
pub fn coupon_schedule(security: &SecurityRecord, reference: Date) -> BondResult<Vec<Date>> {
    let months = security.frequency.months_per_period() as i32;
    let first = security.resolve_first_coupon()?;
    let dates = forward_from_first(security, first, months, reference)?;

    trace!(
        "{}: generated {} coupon dates ({} to {})",
        security.cusip,
        dates.len(),
        dates[0],
        dates[dates.len() - 1]
    );
    Ok(dates)
}

fn forward_from_first(
    security: &SecurityRecord,
    first: Date,
    months: i32,
    reference: Date,
) -> BondResult<Vec<Date>> {
    let anchor = first.day();
    let mut dates = Vec::new();

    // Theoretical prior coupons when settling before the first coupon
    let mut back_steps = 0i32;
    let mut earliest = first;
    while reference < earliest {
        back_steps += 1;
        if back_steps as usize > MAX_PERIODS {
            return Err(BondError::schedule_overflow(&security.cusip, MAX_PERIODS));
        }
        earliest = first.add_months_anchored(-months * back_steps, anchor)?;
        dates.push(earliest);
    }
    dates.reverse();
    dates.push(first);

    let mut forward_steps = 0i32;
    while *dates.last().unwrap_or(&first) < security.maturity_date {
        forward_steps += 1;
        if dates.len() > MAX_PERIODS {
            return Err(BondError::schedule_overflow(&security.cusip, MAX_PERIODS));
        }
        let candidate = first.add_months_anchored(months * forward_steps, anchor)?;
        if candidate >= security.maturity_date {
            dates.push(security.maturity_date);
        } else {
            dates.push(candidate);
        }
    }

    Ok(dates)
}

/// Locates the coupon period enclosing `reference` in a generated
/// schedule.
///
/// # Errors
///
/// `NoEnclosingPeriod` when `reference` lies before the first date
/// ([`PeriodBound::BeforeFirstCoupon`]) or on/after the last
/// ([`PeriodBound::AfterMaturity`]).
pub fn enclosing_period(
    dates: &[Date],
    reference: Date,
    cusip: &str,
) -> BondResult<CouponPeriod> {
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return Err(BondError::invalid_spec(format!(
            "{cusip}: empty coupon schedule"
        )));
    };

    if reference < *first {
        return Err(BondError::no_enclosing_period(
            cusip,
            reference,
            PeriodBound::BeforeFirstCoupon,
        ));
    }
    if reference >= *last {
        return Err(BondError::no_enclosing_period(
            cusip,
            reference,
            PeriodBound::AfterMaturity,
        ));
    }

    dates
        .windows(2)
        .find(|w| w[0] <= reference && reference < w[1])
        .map(|w| CouponPeriod {
            last_coupon: w[0],
            next_coupon: w[1],
        })
        .ok_or_else(|| {
            BondError::invalid_spec(format!("{cusip}: coupon dates are not increasing"))
        })
}
