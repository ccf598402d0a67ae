//! Domain types for curve fitting and bond pricing.

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{Cashflow, CashflowKind};
pub use date::Date;
pub use frequency::Frequency;
