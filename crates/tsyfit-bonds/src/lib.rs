//! # Tsyfit Bonds
//!
//! Treasury security handling for the Tsyfit curve-fitting library:
//!
//! - **Types**: validated [`SecurityRecord`]s normalized from loosely
//!   typed upstream feeds
//! - **Cashflows**: coupon schedule generation with anchored
//!   month-stepping, enclosing-period lookup, Actual/Actual accrued
//!   interest
//! - **Pricing**: clean/dirty pricing breakdowns, cashflow streams and
//!   market quotes for curve calibration, yield-to-maturity solving
//!
//! ## Example
//!
//! ```
//! use tsyfit_bonds::pricing::price_security;
//! use tsyfit_bonds::types::{SecurityRecord, SecurityType};
//! use tsyfit_core::types::{Date, Frequency};
//!
//! let note = SecurityRecord::new(
//!     "91282CJK8",
//!     SecurityType::Note,
//!     Date::from_ymd(2024, 2, 15).unwrap(),
//!     Date::from_ymd(2034, 2, 15).unwrap(),
//!     4.0,
//!     Frequency::SemiAnnual,
//! )
//! .unwrap()
//! .with_first_coupon_date(Date::from_ymd(2024, 8, 15).unwrap());
//!
//! let settlement = Date::from_ymd(2025, 11, 19).unwrap();
//! let breakdown = price_security(&note, 98.5, settlement).unwrap();
//! assert_eq!(breakdown.dirty_price.to_string(), "99.543478");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod types;

pub use error::{BondError, BondResult, PeriodBound};
pub use types::{SecurityRecord, SecurityType};
