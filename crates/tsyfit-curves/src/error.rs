//! Error types for curve modeling and calibration.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve fitting and evaluation.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Too few market observations for the parameter count.
    #[error("Insufficient data: need at least {required} observations for a {required}-parameter fit, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Target maturity outside the supported range.
    #[error("Invalid maturity: {value} years is outside (0, {max}]")]
    InvalidMaturity {
        /// The requested maturity in years.
        value: f64,
        /// The maximum supported maturity.
        max: f64,
    },

    /// Malformed market observation.
    #[error("Invalid observation: {reason}")]
    InvalidObservation {
        /// Description of the problem.
        reason: String,
    },

    /// Optimizer-level error.
    #[error("Math error: {0}")]
    Math(#[from] tsyfit_math::MathError),
}

impl CurveError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid observation error.
    #[must_use]
    pub fn invalid_observation(reason: impl Into<String>) -> Self {
        Self::InvalidObservation {
            reason: reason.into(),
        }
    }
}
