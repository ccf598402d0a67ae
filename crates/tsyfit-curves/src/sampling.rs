//! Sampling fitted curves for display and export.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::svensson::SvenssonParams;

/// Longest maturity the sampling surface answers for, in years.
pub const MAX_MATURITY: f64 = 30.0;

/// A sampled `(maturity, rate)` point on a fitted curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Spot rate in percent.
    pub rate: f64,
}

/// Evaluates the spot rate at a single maturity, in percent.
///
/// The model itself tolerates any input; this surface is stricter and
/// only answers for maturities in `(0, 30]` years, the range Treasury
/// securities actually span.
///
/// # Errors
///
/// Returns `CurveError::InvalidMaturity` outside that range.
pub fn spot_rate(maturity_years: f64, params: &SvenssonParams) -> CurveResult<f64> {
    if !maturity_years.is_finite() || maturity_years <= 0.0 || maturity_years > MAX_MATURITY {
        return Err(CurveError::InvalidMaturity {
            value: maturity_years,
            max: MAX_MATURITY,
        });
    }
    Ok(params.spot_rate(maturity_years) * 100.0)
}

/// Samples a fitted curve at evenly spaced maturities.
///
/// Returns a lazy, restartable iterator over [`CurvePoint`]s from
/// `min_maturity` to `max_maturity` inclusive. Maturities where the
/// model evaluates to a non-finite rate are skipped rather than
/// emitted. Rates are in percent.
#[must_use]
pub fn yield_curve(
    params: &SvenssonParams,
    num_points: usize,
    min_maturity: f64,
    max_maturity: f64,
) -> CurveSamples {
    CurveSamples {
        params: *params,
        num_points,
        min_maturity,
        max_maturity,
        next_index: 0,
    }
}

/// Iterator returned by [`yield_curve`].
///
/// `Clone` restarts the traversal from the beginning, so one sampling
/// plan can feed several consumers.
#[derive(Debug, Clone)]
pub struct CurveSamples {
    params: SvenssonParams,
    num_points: usize,
    min_maturity: f64,
    max_maturity: f64,
    next_index: usize,
}

impl CurveSamples {
    fn maturity_at(&self, index: usize) -> f64 {
        if self.num_points <= 1 {
            return self.min_maturity;
        }
        let step = (self.max_maturity - self.min_maturity) / (self.num_points - 1) as f64;
        self.min_maturity + step * index as f64
    }
}

impl Iterator for CurveSamples {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        while self.next_index < self.num_points {
            let maturity = self.maturity_at(self.next_index);
            self.next_index += 1;

            let rate = self.params.spot_rate(maturity) * 100.0;
            if rate.is_finite() {
                return Some(CurvePoint { maturity, rate });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Non-finite skips can only shrink the count
        (0, Some(self.num_points - self.next_index.min(self.num_points)))
    }
}
