//! # Tsyfit Curves
//!
//! Nelson-Siegel-Svensson yield curve modeling and calibration for the
//! Tsyfit Treasury curve-fitting library:
//!
//! - **Model**: the six-parameter Svensson spot-rate function with
//!   numerically stable loading factors
//! - **Calibration**: Nelder-Mead fitting against market yields or
//!   dirty bond prices, each a distinct named strategy
//! - **Sampling**: single-point spot rates in percent and lazy
//!   evenly-spaced curve traversals
//!
//! ## Example
//!
//! ```
//! use tsyfit_curves::calibration::{fit_yields, FitConfig, MarketObservation};
//! use tsyfit_curves::sampling::spot_rate;
//!
//! let observations: Vec<MarketObservation> = [
//!     (0.25, 0.0405),
//!     (1.0, 0.0410),
//!     (2.0, 0.0415),
//!     (5.0, 0.0425),
//!     (10.0, 0.0440),
//!     (30.0, 0.0465),
//! ]
//! .iter()
//! .map(|&(term, y)| MarketObservation::new(term, y))
//! .collect();
//!
//! let fit = fit_yields(&observations, &FitConfig::default()).unwrap();
//! let ten_year = spot_rate(10.0, &fit.parameters).unwrap();
//! assert!((ten_year - 4.40).abs() < 0.25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod calibration;
pub mod error;
pub mod sampling;
pub mod svensson;

pub use calibration::{fit_prices, fit_yields, FitConfig, FitResult};
pub use error::{CurveError, CurveResult};
pub use svensson::SvenssonParams;
