//! Security pricing and calibration-input generation.
//!
//! Two consumers share the same schedule and accrual logic:
//!
//! - [`price_security`] produces a display-ready pricing breakdown
//!   (clean price, accrued interest, dirty price) for one security.
//! - [`cashflow_stream`] / [`market_bond`] / [`market_observation`]
//!   turn securities into calibration inputs for the curve-fitting
//!   driver.
//!
//! Keeping both on one accrual path means the dirty price fed into
//! calibration always matches the standalone pricing breakdown.

pub mod ytm;

use log::debug;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tsyfit_core::daycounts::curve_term;
use tsyfit_core::types::{Cashflow, CashflowKind, Date};
use tsyfit_curves::calibration::{BondQuote, MarketObservation};

use crate::cashflows::{
    accrued_interest, coupon_schedule, enclosing_period, AccruedInterest, CouponPeriod,
};
use crate::error::{BondError, BondResult, PeriodBound};
use crate::types::SecurityRecord;

/// Face value all per-100 Treasury quotes are stated against.
pub const FACE_VALUE: f64 = 100.0;

/// Coupon-period detail attached to a pricing breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDetail {
    /// Last coupon date at or before the reference date.
    pub last_coupon: Date,
    /// Next coupon date after the reference date.
    pub next_coupon: Date,
    /// Actual days in the coupon period.
    pub days_in_period: i64,
    /// Actual days accrued at the reference date.
    pub days_accrued: i64,
    /// Accrual fraction, rounded to 8 decimal places.
    pub accrual_fraction: Decimal,
    /// Full coupon payment for the period, rounded to 6 decimal places.
    pub coupon_payment: Decimal,
}

/// A pricing breakdown for one security at one reference date.
///
/// Monetary fields are rounded to fixed precision (6 decimal places,
/// the accrual fraction to 8) purely for display determinism; all
/// internal computation runs at full `f64` precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Quoted clean price.
    pub clean_price: Decimal,
    /// Accrued interest since the last coupon.
    pub accrued_interest: Decimal,
    /// Clean price plus accrued interest.
    pub dirty_price: Decimal,
    /// Coupon-period detail; absent for zero-coupon securities.
    pub period: Option<PeriodDetail>,
}

fn money(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(6)
}

fn fraction(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(8)
}

/// Accrued interest for a security, `None` for zero-coupon securities.
///
/// The shared accrual path behind [`price_security`] and
/// [`market_bond`].
fn resolve_accrued(
    security: &SecurityRecord,
    reference: Date,
) -> BondResult<Option<(CouponPeriod, AccruedInterest)>> {
    if security.is_zero_coupon() {
        return Ok(None);
    }

    let dates = coupon_schedule(security, reference)?;
    let period = enclosing_period(&dates, reference, &security.cusip)?;
    let ai = accrued_interest(
        &period,
        reference,
        security.coupon_rate_decimal(),
        security.frequency,
        FACE_VALUE,
    )?;

    Ok(Some((period, ai)))
}

/// Prices one security at a reference date.
///
/// Zero-coupon rule: bills and zero-rate securities carry no accrued
/// interest, so the dirty price equals the clean price exactly.
/// Coupon-bearing securities resolve their enclosing coupon period and
/// add Actual/Actual accrued interest.
///
/// # Errors
///
/// `InvalidSpec` for a non-positive clean price; schedule and accrual
/// errors (`ScheduleOverflow`, `NoEnclosingPeriod`) propagate.
pub fn price_security(
    security: &SecurityRecord,
    clean_price: f64,
    reference: Date,
) -> BondResult<PricingBreakdown> {
    if !clean_price.is_finite() || clean_price <= 0.0 {
        return Err(BondError::invalid_spec(format!(
            "{}: clean price {clean_price} is not a positive number",
            security.cusip
        )));
    }

    let Some((period, ai)) = resolve_accrued(security, reference)? else {
        return Ok(PricingBreakdown {
            clean_price: money(clean_price),
            accrued_interest: Decimal::ZERO,
            dirty_price: money(clean_price),
            period: None,
        });
    };

    Ok(PricingBreakdown {
        clean_price: money(clean_price),
        accrued_interest: money(ai.accrued),
        dirty_price: money(clean_price + ai.accrued),
        period: Some(PeriodDetail {
            last_coupon: period.last_coupon,
            next_coupon: period.next_coupon,
            days_in_period: ai.days_in_period,
            days_accrued: ai.days_accrued,
            accrual_fraction: fraction(ai.accrual_fraction),
            coupon_payment: money(ai.coupon_payment),
        }),
    })
}

/// Generates the security's future cashflows from a reference date.
///
/// Zero-coupon securities produce a single principal flow at maturity.
/// Coupon-bearing securities produce one coupon flow per future
/// payment date (payments at or before `reference` are skipped) and a
/// final combined principal-and-coupon flow at maturity. Terms use the
/// `days / 365.25` curve convention.
///
/// # Errors
///
/// `NoEnclosingPeriod` (after maturity) when the security has already
/// matured; schedule errors propagate.
pub fn cashflow_stream(
    security: &SecurityRecord,
    reference: Date,
) -> BondResult<Vec<Cashflow>> {
    if reference >= security.maturity_date {
        return Err(BondError::no_enclosing_period(
            &security.cusip,
            reference,
            PeriodBound::AfterMaturity,
        ));
    }

    if security.is_zero_coupon() {
        return Ok(vec![Cashflow::new(
            security.maturity_date,
            curve_term(reference, security.maturity_date),
            FACE_VALUE,
            CashflowKind::Principal,
        )]);
    }

    let coupon = security.coupon_rate_decimal()
        / f64::from(security.frequency.periods_per_year())
        * FACE_VALUE;

    let dates = coupon_schedule(security, reference)?;
    let flows: Vec<Cashflow> = dates
        .iter()
        .filter(|&&date| date > reference)
        .map(|&date| {
            if date == security.maturity_date {
                Cashflow::new(
                    date,
                    curve_term(reference, date),
                    FACE_VALUE + coupon,
                    CashflowKind::PrincipalAndCoupon,
                )
            } else {
                Cashflow::new(date, curve_term(reference, date), coupon, CashflowKind::Coupon)
            }
        })
        .collect();

    debug!(
        "{}: {} future cashflows from {}",
        security.cusip,
        flows.len(),
        reference
    );
    Ok(flows)
}

/// Prepares a security for the price-space calibration path.
///
/// The dirty price uses the same accrual logic as [`price_security`],
/// so the calibration target is consistent with the standalone pricing
/// breakdown.
///
/// # Errors
///
/// Same failure modes as [`price_security`] and [`cashflow_stream`].
pub fn market_bond(
    security: &SecurityRecord,
    clean_price: f64,
    reference: Date,
) -> BondResult<BondQuote> {
    if !clean_price.is_finite() || clean_price <= 0.0 {
        return Err(BondError::invalid_spec(format!(
            "{}: clean price {clean_price} is not a positive number",
            security.cusip
        )));
    }

    let cashflows = cashflow_stream(security, reference)?;
    let accrued = resolve_accrued(security, reference)?.map_or(0.0, |(_, ai)| ai.accrued);

    Ok(BondQuote::new(
        security.cusip.clone(),
        cashflows,
        clean_price + accrued,
    ))
}

/// Prepares a `(term, yield)` observation for the yield-space
/// calibration path.
///
/// # Errors
///
/// `NoEnclosingPeriod` (after maturity) for a matured security.
pub fn market_observation(
    security: &SecurityRecord,
    reference: Date,
    yield_value: f64,
) -> BondResult<MarketObservation> {
    if reference >= security.maturity_date {
        return Err(BondError::no_enclosing_period(
            &security.cusip,
            reference,
            PeriodBound::AfterMaturity,
        ));
    }

    Ok(MarketObservation::new(
        curve_term(reference, security.maturity_date),
        yield_value,
    ))
}
