//! Cash flow types for bond pricing and curve calibration.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// The kind of payment a cash flow represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Periodic coupon payment.
    Coupon,
    /// Principal redemption.
    Principal,
    /// Final payment combining principal and the last coupon.
    PrincipalAndCoupon,
}

impl CashflowKind {
    /// Returns true if this cash flow redeems principal.
    #[must_use]
    pub fn includes_principal(&self) -> bool {
        matches!(
            self,
            CashflowKind::Principal | CashflowKind::PrincipalAndCoupon
        )
    }
}

/// A single dated cash flow.
///
/// Generated fresh per security per reference date. Sequences are
/// ordered by increasing date; the last element always includes
/// principal and falls on the maturity date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date.
    pub date: Date,
    /// Years from the reference date (days / 365.25 convention).
    pub term: f64,
    /// Payment amount in currency units.
    pub amount: f64,
    /// Payment kind.
    pub kind: CashflowKind,
}

impl Cashflow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, term: f64, amount: f64, kind: CashflowKind) -> Self {
        Self {
            date,
            term,
            amount,
            kind,
        }
    }
}

impl fmt::Display for Cashflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} @ {} ({:?})",
            self.date, self.amount, self.term, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_includes_principal() {
        assert!(!CashflowKind::Coupon.includes_principal());
        assert!(CashflowKind::Principal.includes_principal());
        assert!(CashflowKind::PrincipalAndCoupon.includes_principal());
    }

    #[test]
    fn test_cashflow_serde() {
        let cf = Cashflow::new(
            Date::from_ymd(2034, 2, 15).unwrap(),
            8.24,
            102.0,
            CashflowKind::PrincipalAndCoupon,
        );
        let json = serde_json::to_string(&cf).unwrap();
        let back: Cashflow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cf);
    }
}
