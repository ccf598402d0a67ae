//! Coupon schedules and accrued interest.

mod accrued;
mod schedule;

pub use accrued::{accrued_interest, AccruedInterest};
pub use schedule::{coupon_schedule, enclosing_period, CouponPeriod, MAX_PERIODS};
