//! # Tsyfit Math
//!
//! Numerical routines for the Tsyfit Treasury curve-fitting library:
//!
//! - **Optimization**: Nelder-Mead simplex with optional box
//!   constraints, used to calibrate curve parameters
//! - **Solvers**: Newton-Raphson and bisection root finders, used for
//!   yield-to-maturity inversion
//!
//! All routines are pure over their inputs; each call owns its own
//! state, so concurrent calibrations never share optimizer state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod optimization;
pub mod solvers;

pub use error::{MathError, MathResult};
