//! Derivative-free optimization.
//!
//! Curve calibration minimizes a sum-of-squares objective over the
//! model parameters. The objective is cheap but not differentiable in
//! closed form once penalty values enter, so a direct-search method is
//! used: the [`nelder_mead`] simplex with optional per-dimension box
//! constraints.

mod nelder_mead;

pub use nelder_mead::{nelder_mead, NelderMeadConfig, SimplexResult};

use crate::error::{MathError, MathResult};

/// Per-dimension box constraints for an optimizer.
#[derive(Debug, Clone)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates box constraints from lower and upper bound vectors.
    ///
    /// Use `f64::NEG_INFINITY` / `f64::INFINITY` for one-sided or
    /// unbounded dimensions.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` if the vectors differ in
    /// length or any lower bound exceeds its upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> MathResult<Self> {
        if lower.len() != upper.len() {
            return Err(MathError::invalid_input(format!(
                "bound vectors differ in length: {} vs {}",
                lower.len(),
                upper.len()
            )));
        }
        for (d, (lo, hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo > hi {
                return Err(MathError::invalid_input(format!(
                    "lower bound {lo} exceeds upper bound {hi} in dimension {d}"
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns the bound range of a dimension (may be infinite).
    #[must_use]
    pub fn range(&self, dimension: usize) -> f64 {
        self.upper[dimension] - self.lower[dimension]
    }

    /// Clamps a point into the box.
    #[must_use]
    pub fn clamp(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .map(|(xi, (lo, hi))| xi.clamp(*lo, *hi))
            .collect()
    }
}
