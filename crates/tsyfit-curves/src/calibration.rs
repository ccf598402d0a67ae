//! Curve calibration against market observations.
//!
//! Two distinct named fitting strategies are exposed:
//!
//! - [`fit_yields`]: minimizes squared yield errors, treating each
//!   observed yield as directly comparable to a zero-coupon spot rate.
//!   Simple, and an approximation when the quotes are YTMs.
//! - [`fit_prices`]: minimizes squared dirty-price errors by
//!   discounting every cashflow at the model spot rate for its term
//!   (continuous compounding). Prices coupon bonds correctly and is
//!   the preferred strategy.
//!
//! The strategies produce different fitted parameters from the same
//! market; callers choose explicitly rather than the driver switching
//! between them.

use log::debug;
use serde::{Deserialize, Serialize};

use tsyfit_core::types::Cashflow;
use tsyfit_math::optimization::{nelder_mead, Bounds, NelderMeadConfig};

use crate::error::{CurveError, CurveResult};
use crate::svensson::{SvenssonParams, TAU_FLOOR};

/// Minimum observations for a six-parameter fit.
pub const MIN_OBSERVATIONS: usize = 6;

/// Objective value returned for infeasible decay factors.
///
/// A soft constraint: the optimizer is steered away from the singular
/// region near zero decay without the step being rejected outright.
pub const DEFAULT_PENALTY: f64 = 1e9;

/// Upper bound for the decay factors during optimization.
const MAX_TAU: f64 = 30.0;

/// Terms are floored here before discounting.
const MIN_DISCOUNT_TERM: f64 = 1e-6;

/// A single `(term, yield)` curve-fitting point.
///
/// Yield unit (percent or decimal) only needs to be consistent across
/// one calibration run; the fitted betas come out in the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    /// Term to maturity in years (> 0).
    pub term: f64,
    /// Observed yield.
    pub yield_value: f64,
}

impl MarketObservation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(term: f64, yield_value: f64) -> Self {
        Self { term, yield_value }
    }
}

/// A bond prepared for the discounted-cashflow calibration path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondQuote {
    /// CUSIP identifier.
    pub cusip: String,
    /// Future cashflows ordered by date, terms from the reference date.
    pub cashflows: Vec<Cashflow>,
    /// Observed dirty price at the reference date.
    pub dirty_price: f64,
}

impl BondQuote {
    /// Creates a new bond quote.
    #[must_use]
    pub fn new(cusip: impl Into<String>, cashflows: Vec<Cashflow>, dirty_price: f64) -> Self {
        Self {
            cusip: cusip.into(),
            cashflows,
            dirty_price,
        }
    }
}

/// Where the optimizer starts its search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StartingPoint {
    /// Derive the start from the data: long-end level, short-minus-long
    /// slope, zero curvature, decay factors 1.5 and 5.0.
    #[default]
    Heuristic,
    /// Start from fixed parameters, e.g. yesterday's fit.
    Fixed(SvenssonParams),
}

/// Configuration for a calibration run.
///
/// An explicit value passed into the driver; there are no module-level
/// defaults to couple one call to the next.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    /// Simplex optimizer settings.
    pub optimizer: NelderMeadConfig,
    /// Starting point policy.
    pub starting_point: StartingPoint,
    /// Objective value substituted for infeasible parameters.
    pub penalty: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            optimizer: NelderMeadConfig::default().with_max_iterations(2_000),
            starting_point: StartingPoint::default(),
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl FitConfig {
    /// Sets the starting point policy.
    #[must_use]
    pub fn with_starting_point(mut self, starting_point: StartingPoint) -> Self {
        self.starting_point = starting_point;
        self
    }

    /// Sets the optimizer iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.optimizer = self.optimizer.with_max_iterations(max_iterations);
        self
    }
}

/// Diagnostic wrapper around a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// The fitted curve parameters.
    pub parameters: SvenssonParams,
    /// Final sum of squared errors.
    pub sum_squared_error: f64,
    /// Optimizer iterations used.
    pub iterations: u32,
    /// Number of observations fitted.
    pub data_points: usize,
}

impl FitResult {
    /// Root-mean-square error, the headline fit-quality metric.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        if self.data_points == 0 {
            return 0.0;
        }
        (self.sum_squared_error / self.data_points as f64).sqrt()
    }
}

/// Fits the curve to `(term, yield)` observations.
///
/// Minimizes the sum of squared differences between observed yields
/// and model spot rates.
///
/// # Errors
///
/// `InsufficientData` with fewer than [`MIN_OBSERVATIONS`] points,
/// `InvalidObservation` for non-positive terms or non-finite values.
pub fn fit_yields(
    observations: &[MarketObservation],
    config: &FitConfig,
) -> CurveResult<FitResult> {
    if observations.len() < MIN_OBSERVATIONS {
        return Err(CurveError::insufficient_data(
            MIN_OBSERVATIONS,
            observations.len(),
        ));
    }
    for obs in observations {
        if !obs.term.is_finite() || obs.term <= 0.0 || !obs.yield_value.is_finite() {
            return Err(CurveError::invalid_observation(format!(
                "term {} / yield {} is not a usable data point",
                obs.term, obs.yield_value
            )));
        }
    }

    let yield_scale = observations
        .iter()
        .fold(0.0_f64, |m, o| m.max(o.yield_value.abs()));
    let initial = starting_parameters(config, &yield_anchors(observations));
    debug!(
        "fitting yield-space objective: {} observations, start {:?}",
        observations.len(),
        initial
    );

    let penalty = config.penalty;
    let objective = |x: &[f64]| {
        let params = params_from_slice(x);
        if !params.is_feasible() {
            return penalty;
        }
        observations
            .iter()
            .map(|obs| {
                let err = obs.yield_value - params.spot_rate(obs.term);
                err * err
            })
            .sum()
    };

    run_fit(objective, initial, yield_scale, config, observations.len())
}

/// Fits the curve to dirty bond prices by discounted cashflows.
///
/// For each bond, every cashflow is discounted at
/// `exp(-z(t) * t)` with `z` the model spot rate; squared differences
/// between market and model dirty prices are accumulated.
///
/// # Errors
///
/// `InsufficientData` with fewer than [`MIN_OBSERVATIONS`] bonds,
/// `InvalidObservation` for empty cashflow schedules or non-positive
/// prices.
pub fn fit_prices(bonds: &[BondQuote], config: &FitConfig) -> CurveResult<FitResult> {
    if bonds.len() < MIN_OBSERVATIONS {
        return Err(CurveError::insufficient_data(MIN_OBSERVATIONS, bonds.len()));
    }
    for bond in bonds {
        if bond.cashflows.is_empty() {
            return Err(CurveError::invalid_observation(format!(
                "bond {} has no future cashflows",
                bond.cusip
            )));
        }
        if !bond.dirty_price.is_finite() || bond.dirty_price <= 0.0 {
            return Err(CurveError::invalid_observation(format!(
                "bond {} has unusable dirty price {}",
                bond.cusip, bond.dirty_price
            )));
        }
    }

    let anchors = price_anchors(bonds);
    let yield_scale = anchors.short_yield.abs().max(anchors.long_yield.abs());
    let initial = starting_parameters(config, &anchors);
    debug!(
        "fitting price-space objective: {} bonds, start {:?}",
        bonds.len(),
        initial
    );

    let penalty = config.penalty;
    let objective = |x: &[f64]| {
        let params = params_from_slice(x);
        if !params.is_feasible() {
            return penalty;
        }
        bonds
            .iter()
            .map(|bond| {
                let err = bond.dirty_price - model_price(&params, &bond.cashflows);
                err * err
            })
            .sum()
    };

    run_fit(objective, initial, yield_scale, config, bonds.len())
}

/// Model dirty price: cashflows discounted at the spot rate for their
/// term, continuous compounding.
#[must_use]
pub fn model_price(params: &SvenssonParams, cashflows: &[Cashflow]) -> f64 {
    cashflows
        .iter()
        .map(|cf| {
            let t = cf.term.max(MIN_DISCOUNT_TERM);
            cf.amount * (-params.spot_rate(t) * t).exp()
        })
        .sum()
}

fn run_fit<F>(
    objective: F,
    initial: SvenssonParams,
    yield_scale: f64,
    config: &FitConfig,
    data_points: usize,
) -> CurveResult<FitResult>
where
    F: FnMut(&[f64]) -> f64,
{
    let bounds = parameter_bounds(yield_scale)?;
    let result = nelder_mead(objective, &initial.to_array(), Some(&bounds), &config.optimizer)?;

    let parameters = params_from_slice(&result.x);
    debug!(
        "fit complete: sse={:.6e}, {} iterations",
        result.fx, result.iterations
    );

    Ok(FitResult {
        parameters,
        sum_squared_error: result.fx,
        iterations: result.iterations,
        data_points,
    })
}

/// Short-end and long-end anchors drawn from the data, used by the
/// heuristic starting point.
struct Anchors {
    short_yield: f64,
    long_yield: f64,
}

fn yield_anchors(observations: &[MarketObservation]) -> Anchors {
    let short = observations
        .iter()
        .min_by(|a, b| a.term.total_cmp(&b.term))
        .map_or(0.04, |o| o.yield_value);
    let long = observations
        .iter()
        .max_by(|a, b| a.term.total_cmp(&b.term))
        .map_or(0.04, |o| o.yield_value);
    Anchors {
        short_yield: short,
        long_yield: long,
    }
}

fn price_anchors(bonds: &[BondQuote]) -> Anchors {
    // Crude zero-yield proxy per bond: log of total undiscounted
    // cashflows over dirty price, annualized by the final term.
    let crude_yield = |bond: &BondQuote| -> Option<f64> {
        let last_term = bond.cashflows.last()?.term;
        if last_term <= 0.0 {
            return None;
        }
        let total: f64 = bond.cashflows.iter().map(|cf| cf.amount).sum();
        let y = (total / bond.dirty_price).ln() / last_term;
        y.is_finite().then_some(y)
    };

    let short = bonds
        .iter()
        .filter(|b| !b.cashflows.is_empty())
        .min_by(|a, b| last_term(a).total_cmp(&last_term(b)))
        .and_then(crude_yield)
        .unwrap_or(0.04);
    let long = bonds
        .iter()
        .filter(|b| !b.cashflows.is_empty())
        .max_by(|a, b| last_term(a).total_cmp(&last_term(b)))
        .and_then(crude_yield)
        .unwrap_or(0.04);

    Anchors {
        short_yield: short,
        long_yield: long,
    }
}

fn last_term(bond: &BondQuote) -> f64 {
    bond.cashflows.last().map_or(0.0, |cf| cf.term)
}

fn starting_parameters(config: &FitConfig, anchors: &Anchors) -> SvenssonParams {
    match config.starting_point {
        StartingPoint::Fixed(params) => params,
        StartingPoint::Heuristic => SvenssonParams::new(
            anchors.long_yield,
            anchors.short_yield - anchors.long_yield,
            0.0,
            0.0,
            1.5,
            5.0,
        ),
    }
}

fn params_from_slice(x: &[f64]) -> SvenssonParams {
    SvenssonParams::new(x[0], x[1], x[2], x[3], x[4], x[5])
}

fn parameter_bounds(yield_scale: f64) -> CurveResult<Bounds> {
    // Betas are boxed in the unit the observations arrive in: three
    // times the largest observed magnitude, floored at 1.0 so a
    // decimal-quoted run keeps a usable range. Decay factors stay
    // strictly positive and below the 30-year horizon.
    let beta = (3.0 * yield_scale).max(1.0);
    Ok(Bounds::new(
        vec![-beta, -beta, -beta, -beta, TAU_FLOOR, TAU_FLOOR],
        vec![beta, beta, beta, beta, MAX_TAU, MAX_TAU],
    )?)
}
