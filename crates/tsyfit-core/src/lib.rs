//! # Tsyfit Core
//!
//! Core types, calendars, and day-count utilities for the Tsyfit
//! Treasury curve-fitting library.
//!
//! This crate provides the foundational building blocks used throughout
//! Tsyfit:
//!
//! - **Types**: `Date`, `Frequency`, and `Cashflow`
//! - **Calendars**: the US federal holiday calendar and business day
//!   resolution
//! - **Day Counts**: Actual day counting for accrual fractions and the
//!   `days / 365.25` convention for curve-fitting terms
//!
//! ## Example
//!
//! ```rust
//! use tsyfit_core::prelude::*;
//!
//! let settlement = Date::from_ymd(2025, 11, 19).unwrap();
//! let maturity = Date::from_ymd(2034, 2, 15).unwrap();
//! let term = tsyfit_core::daycounts::curve_term(settlement, maturity);
//! assert!(term > 8.0 && term < 8.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, USCalendar};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Cashflow, CashflowKind, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Cashflow, CashflowKind, Date, Frequency};
