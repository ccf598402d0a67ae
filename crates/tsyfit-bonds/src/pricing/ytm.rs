//! Yield-to-maturity solving.
//!
//! Inverts the discounted-cashflow price function for the single rate
//! that reproduces an observed dirty price. Continuous compounding
//! throughout, matching the discounting used by the price-space
//! calibration objective.

use log::debug;

use tsyfit_core::types::Cashflow;
use tsyfit_math::solvers::{bisection, newton_raphson_numerical, SolverConfig};

use crate::error::{BondError, BondResult};
use crate::pricing::FACE_VALUE;

/// Lower bound of the sane yield bracket.
pub const BRACKET_LOW: f64 = -0.05;

/// Upper bound of the sane yield bracket.
pub const BRACKET_HIGH: f64 = 0.50;

/// Clamp range for the initial Newton guess.
const GUESS_RANGE: (f64, f64) = (-0.02, 0.30);

/// Result of a yield-to-maturity calculation.
#[derive(Debug, Clone, Copy)]
pub struct YtmResult {
    /// The yield as a decimal (continuous compounding).
    pub yield_value: f64,
    /// Iterations used by whichever method converged.
    pub iterations: u32,
    /// Final pricing residual.
    pub residual: f64,
}

/// Yield-to-maturity solver.
///
/// Newton-Raphson with a central-difference derivative, falling back
/// to bisection on the widened bracket when the derivative flattens or
/// an iterate escapes the sane range.
#[derive(Debug, Clone)]
pub struct YtmSolver {
    config: SolverConfig,
}

impl Default for YtmSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YtmSolver {
    /// Creates a solver with default settings: tolerance `1e-8`,
    /// 100 iterations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Sets the pricing residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Solves for the yield matching a dirty price.
    ///
    /// The initial guess is the textbook approximation
    /// `coupon + (face - price) / (price * years)`, clamped to
    /// `[-0.02, 0.30]`.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` for an empty cashflow schedule or non-positive
    /// price; `NoRootInInterval` when the price cannot be reproduced by
    /// any yield in `[-0.05, 0.50]`.
    pub fn solve(
        &self,
        cusip: &str,
        cashflows: &[Cashflow],
        dirty_price: f64,
        coupon_rate_decimal: f64,
    ) -> BondResult<YtmResult> {
        let Some(last) = cashflows.last() else {
            return Err(BondError::invalid_spec(format!(
                "{cusip}: no future cashflows to solve against"
            )));
        };
        if !dirty_price.is_finite() || dirty_price <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{cusip}: dirty price {dirty_price} is not a positive number"
            )));
        }
        let years = last.term;
        if years <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{cusip}: final cashflow term {years} is not in the future"
            )));
        }

        let guess = (coupon_rate_decimal + (FACE_VALUE - dirty_price) / (dirty_price * years))
            .clamp(GUESS_RANGE.0, GUESS_RANGE.1);

        let objective = |y: f64| discounted_price(cashflows, y) - dirty_price;

        match newton_raphson_numerical(objective, guess, &self.config) {
            Ok(result) if (BRACKET_LOW..=BRACKET_HIGH).contains(&result.root) => Ok(YtmResult {
                yield_value: result.root,
                iterations: result.iterations,
                residual: result.residual,
            }),
            Ok(result) => {
                debug!(
                    "{cusip}: Newton converged outside [{BRACKET_LOW}, {BRACKET_HIGH}] \
                     (y = {}), retrying with bisection",
                    result.root
                );
                self.bisect(cusip, objective)
            }
            Err(err) => {
                debug!("{cusip}: Newton failed ({err}), falling back to bisection");
                self.bisect(cusip, objective)
            }
        }
    }

    fn bisect<F>(&self, cusip: &str, objective: F) -> BondResult<YtmResult>
    where
        F: Fn(f64) -> f64,
    {
        match bisection(&objective, BRACKET_LOW, BRACKET_HIGH, &self.config) {
            Ok(result) => Ok(YtmResult {
                yield_value: result.root,
                iterations: result.iterations,
                residual: result.residual,
            }),
            Err(_) => Err(BondError::NoRootInInterval {
                cusip: cusip.to_string(),
                low: BRACKET_LOW,
                high: BRACKET_HIGH,
            }),
        }
    }
}

/// Dirty price implied by a yield: cashflows discounted at
/// `exp(-y * t)`.
#[must_use]
pub fn discounted_price(cashflows: &[Cashflow], yield_rate: f64) -> f64 {
    cashflows
        .iter()
        .map(|cf| cf.amount * (-yield_rate * cf.term).exp())
        .sum()
}
