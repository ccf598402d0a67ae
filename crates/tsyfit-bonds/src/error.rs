//! Error types for bond operations.

use std::fmt;

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Which side of a bond's life a reference date fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodBound {
    /// Reference date precedes the first generated coupon date.
    BeforeFirstCoupon,
    /// Reference date is on or after the final (maturity) date.
    AfterMaturity,
}

impl fmt::Display for PeriodBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodBound::BeforeFirstCoupon => write!(f, "before the first coupon"),
            PeriodBound::AfterMaturity => write!(f, "after maturity"),
        }
    }
}

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// Invalid security specification.
    #[error("Invalid security specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Coupon-date generation exceeded the safety bound.
    ///
    /// Signals corrupt security metadata (an absurd issue/maturity
    /// span), never a transient condition.
    #[error("Schedule overflow for {cusip}: exceeded {periods} coupon periods")]
    ScheduleOverflow {
        /// CUSIP of the offending security.
        cusip: String,
        /// The period bound that was exceeded.
        periods: usize,
    },

    /// Reference date falls outside the bond's coupon schedule.
    #[error("No enclosing coupon period for {cusip}: reference {reference} is {bound}")]
    NoEnclosingPeriod {
        /// CUSIP of the offending security.
        cusip: String,
        /// The reference date that could not be located.
        reference: String,
        /// Which side of the schedule the date fell on.
        bound: PeriodBound,
    },

    /// Reference date outside the accrual period handed to the
    /// accrued-interest calculation.
    #[error(
        "Reference {reference} outside accrual period [{last_coupon}, {next_coupon})"
    )]
    OutsideAccrualPeriod {
        /// The reference date.
        reference: String,
        /// Period start (last coupon).
        last_coupon: String,
        /// Period end (next coupon).
        next_coupon: String,
    },

    /// Yield solver could not bracket a root.
    ///
    /// Signals a price wildly inconsistent with the cashflow schedule.
    #[error("No root in interval [{low}, {high}] for {cusip}: price inconsistent with cashflows")]
    NoRootInInterval {
        /// CUSIP of the offending security.
        cusip: String,
        /// Lower bracket bound.
        low: f64,
        /// Upper bracket bound.
        high: f64,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] tsyfit_core::CoreError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] tsyfit_math::MathError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a schedule overflow error.
    #[must_use]
    pub fn schedule_overflow(cusip: impl Into<String>, periods: usize) -> Self {
        Self::ScheduleOverflow {
            cusip: cusip.into(),
            periods,
        }
    }

    /// Creates a no-enclosing-period error.
    #[must_use]
    pub fn no_enclosing_period(
        cusip: impl Into<String>,
        reference: impl ToString,
        bound: PeriodBound,
    ) -> Self {
        Self::NoEnclosingPeriod {
            cusip: cusip.into(),
            reference: reference.to_string(),
            bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BondError::schedule_overflow("912828XX1", 300);
        assert!(err.to_string().contains("912828XX1"));
        assert!(err.to_string().contains("300"));

        let err =
            BondError::no_enclosing_period("912828XX1", "2050-01-01", PeriodBound::AfterMaturity);
        assert!(err.to_string().contains("after maturity"));
    }
}
