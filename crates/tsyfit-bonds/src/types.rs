//! Security metadata types.
//!
//! Upstream Treasury feeds are loosely typed: free-text frequencies,
//! optional first-coupon dates, security types as strings. Everything
//! is normalized into one explicit [`SecurityRecord`] at the boundary
//! so the pricing and scheduling code never sees a fallback chain.

use serde::{Deserialize, Serialize};

use tsyfit_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Treasury security type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    /// Discount bill (no coupons).
    Bill,
    /// Coupon note (2-10 year original maturity).
    Note,
    /// Coupon bond (20-30 year original maturity).
    Bond,
    /// Inflation-protected security.
    Tips,
}

impl SecurityType {
    /// Returns true for securities sold at a discount with no coupons.
    #[must_use]
    pub fn is_discount(&self) -> bool {
        matches!(self, SecurityType::Bill)
    }

    /// Parses a free-text security type label.
    ///
    /// Unrecognized labels are treated as coupon notes, the most
    /// common record kind in auction feeds.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bill" => SecurityType::Bill,
            "bond" => SecurityType::Bond,
            "tips" => SecurityType::Tips,
            _ => SecurityType::Note,
        }
    }
}

/// A Treasury security's static terms.
///
/// The required fields are always present; `first_coupon_date` is the
/// one genuinely optional input, with [`SecurityRecord::resolve_first_coupon`]
/// as the named fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// 9-character alphanumeric CUSIP identifier.
    pub cusip: String,
    /// Security type.
    pub security_type: SecurityType,
    /// Issue (dated) date.
    pub issue_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Annual coupon rate in percent (e.g. 4.0 for a 4% coupon).
    pub coupon_rate: f64,
    /// Coupon payment frequency.
    pub frequency: Frequency,
    /// First interest payment date, when the feed supplies one.
    pub first_coupon_date: Option<Date>,
}

impl SecurityRecord {
    /// Creates a validated security record.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` for a malformed CUSIP (must be
    /// 9 ASCII alphanumerics), a maturity not after issue, or a
    /// negative coupon rate.
    pub fn new(
        cusip: impl Into<String>,
        security_type: SecurityType,
        issue_date: Date,
        maturity_date: Date,
        coupon_rate: f64,
        frequency: Frequency,
    ) -> BondResult<Self> {
        let cusip = cusip.into();
        if cusip.len() != 9 || !cusip.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BondError::invalid_spec(format!(
                "malformed CUSIP {cusip:?}: expected 9 alphanumeric characters"
            )));
        }
        if maturity_date <= issue_date {
            return Err(BondError::invalid_spec(format!(
                "{cusip}: maturity {maturity_date} not after issue {issue_date}"
            )));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{cusip}: coupon rate {coupon_rate} is not a non-negative percent"
            )));
        }

        Ok(Self {
            cusip,
            security_type,
            issue_date,
            maturity_date,
            coupon_rate,
            frequency,
            first_coupon_date: None,
        })
    }

    /// Sets the first interest payment date.
    #[must_use]
    pub fn with_first_coupon_date(mut self, date: Date) -> Self {
        self.first_coupon_date = Some(date);
        self
    }

    /// Annual coupon rate as a decimal (4.0% -> 0.04).
    #[must_use]
    pub fn coupon_rate_decimal(&self) -> f64 {
        self.coupon_rate / 100.0
    }

    /// Returns true when the security pays no periodic coupons.
    ///
    /// Bills, explicit zero frequency, and zero coupon rates all price
    /// by the same discount rule.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.security_type.is_discount() || self.frequency.is_zero() || self.coupon_rate == 0.0
    }

    /// Resolves the first coupon date.
    ///
    /// Uses the feed-supplied date when present; otherwise synthesizes
    /// one payment period after the issue date, anchored at the issue
    /// day.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` for zero-coupon securities,
    /// which have no coupon dates at all.
    pub fn resolve_first_coupon(&self) -> BondResult<Date> {
        if self.is_zero_coupon() {
            return Err(BondError::invalid_spec(format!(
                "{}: zero-coupon security has no coupon dates",
                self.cusip
            )));
        }
        if let Some(date) = self.first_coupon_date {
            return Ok(date);
        }

        let months = self.frequency.months_per_period() as i32;
        Ok(self
            .issue_date
            .add_months_anchored(months, self.issue_date.day())?)
    }
}
