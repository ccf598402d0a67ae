//! Nelson-Siegel-Svensson spot rate model.
//!
//! The six-parameter Svensson extension of Nelson-Siegel
//! parameterizes the zero rate curve as:
//!
//! ```text
//! z(t) = β₀ + β₁ * ((1 - e^(-t/τ₁)) / (t/τ₁))
//!           + β₂ * ((1 - e^(-t/τ₁)) / (t/τ₁) - e^(-t/τ₁))
//!           + β₃ * ((1 - e^(-t/τ₂)) / (t/τ₂) - e^(-t/τ₂))
//! ```
//!
//! Where:
//! - β₀: Long-term level (asymptotic zero rate)
//! - β₁: Short-term component (slope)
//! - β₂, β₃: Hump components controlled by the decay factors τ₁, τ₂
//!
//! The second hump term gives the flexibility needed to fit the long
//! end of the Treasury curve independently of the front end.

use serde::{Deserialize, Serialize};

/// Smallest decay factor the model evaluates with.
///
/// Below this the loading factors approach a 0/0 singularity and the
/// optimizer can wander into meaningless fits; calibration treats
/// parameters at or under the floor as infeasible.
pub const TAU_FLOOR: f64 = 0.05;

/// Smallest term the model evaluates at.
const MIN_TERM: f64 = 1e-6;

/// Parameters of a Svensson (NSS) curve.
///
/// An immutable value produced by calibration and consumed by curve
/// evaluation. Fields are public: the calibration driver reads and
/// writes them through the optimizer's flat parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvenssonParams {
    /// Long-term level.
    pub beta0: f64,
    /// Short-term component.
    pub beta1: f64,
    /// First hump component.
    pub beta2: f64,
    /// Second hump component.
    pub beta3: f64,
    /// First decay factor.
    pub tau1: f64,
    /// Second decay factor.
    pub tau2: f64,
}

impl SvenssonParams {
    /// Creates a new parameter set.
    #[must_use]
    pub fn new(beta0: f64, beta1: f64, beta2: f64, beta3: f64, tau1: f64, tau2: f64) -> Self {
        Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        }
    }

    /// Builds parameters from the optimizer's flat vector
    /// `[β₀, β₁, β₂, β₃, τ₁, τ₂]`.
    #[must_use]
    pub fn from_array(x: [f64; 6]) -> Self {
        Self::new(x[0], x[1], x[2], x[3], x[4], x[5])
    }

    /// Returns the flat vector `[β₀, β₁, β₂, β₃, τ₁, τ₂]`.
    #[must_use]
    pub fn to_array(self) -> [f64; 6] {
        [
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        ]
    }

    /// Returns true when both decay factors are strictly above the
    /// floor.
    ///
    /// Kept separate from the evaluation guards so the feasibility
    /// rule and the penalty magnitude can be tested independently.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.tau1 > TAU_FLOOR && self.tau2 > TAU_FLOOR
    }

    /// Evaluates the spot rate at a maturity of `t` years.
    ///
    /// Returns a decimal rate (e.g. 0.045); multiply by 100 for
    /// percentage display. Terms are floored at a small epsilon and
    /// non-positive decay factors are replaced by [`TAU_FLOOR`], so the
    /// function stays finite on invalid optimizer excursions.
    #[must_use]
    pub fn spot_rate(&self, t: f64) -> f64 {
        let t = t.max(MIN_TERM);
        let tau1 = if self.tau1 <= 0.0 { TAU_FLOOR } else { self.tau1 };
        let tau2 = if self.tau2 <= 0.0 { TAU_FLOOR } else { self.tau2 };

        let x1 = t / tau1;
        let x2 = t / tau2;

        self.beta0
            + self.beta1 * loading_factor_1(x1)
            + self.beta2 * loading_factor_2(x1)
            + self.beta3 * loading_factor_2(x2)
    }
}

/// Loading factor `(1 - e^(-x)) / x`.
fn loading_factor_1(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0 - x / 2.0 + x * x / 6.0 // Taylor expansion for numerical stability
    } else {
        (1.0 - (-x).exp()) / x
    }
}

/// Loading factor `(1 - e^(-x)) / x - e^(-x)`.
fn loading_factor_2(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        x / 2.0 - x * x / 3.0
    } else {
        loading_factor_1(x) - (-x).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn typical() -> SvenssonParams {
        SvenssonParams::new(0.045, -0.02, 0.01, -0.005, 2.0, 8.0)
    }

    #[test]
    fn test_asymptotic_long_rate() {
        // As t -> infinity, z(t) -> beta0
        let long_rate = typical().spot_rate(100.0);
        assert_relative_eq!(long_rate, 0.045, epsilon = 0.001);
    }

    #[test]
    fn test_short_rate() {
        // As t -> 0, z(t) -> beta0 + beta1
        let short_rate = typical().spot_rate(0.001);
        assert_relative_eq!(short_rate, 0.025, epsilon = 0.01);
    }

    #[test]
    fn test_zero_term_is_guarded() {
        let rate = typical().spot_rate(0.0);
        assert!(rate.is_finite());
        assert_relative_eq!(rate, 0.025, epsilon = 0.01);
    }

    #[test]
    fn test_invalid_tau_is_guarded() {
        // Negative decay factors evaluate at the floor instead of NaN
        let params = SvenssonParams::new(0.045, -0.02, 0.01, -0.005, -1.0, 0.0);
        assert!(params.spot_rate(5.0).is_finite());
        assert!(!params.is_feasible());
    }

    #[test]
    fn test_feasibility_floor() {
        let mut params = typical();
        assert!(params.is_feasible());

        params.tau1 = TAU_FLOOR;
        assert!(!params.is_feasible());

        params.tau1 = TAU_FLOOR + 1e-6;
        assert!(params.is_feasible());
    }

    #[test]
    fn test_reduces_to_nelson_siegel_when_beta3_zero() {
        // With beta3 = 0 the second hump term drops out; tau2 must not
        // matter.
        let a = SvenssonParams::new(0.045, -0.02, 0.01, 0.0, 2.0, 5.0);
        let b = SvenssonParams::new(0.045, -0.02, 0.01, 0.0, 2.0, 17.0);

        for t in [0.5, 1.0, 2.0, 5.0, 10.0, 30.0] {
            assert_relative_eq!(a.spot_rate(t), b.spot_rate(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_upward_slope() {
        // beta1 < 0 creates an upward sloping curve
        let params = SvenssonParams::new(0.045, -0.02, 0.0, 0.0, 2.0, 8.0);
        assert!(params.spot_rate(0.5) < params.spot_rate(10.0));
    }

    #[test]
    fn test_hump() {
        // beta2 > 0 creates a mid-curve hump
        let params = SvenssonParams::new(0.03, 0.0, 0.02, 0.0, 2.0, 8.0);
        let r_short = params.spot_rate(0.5);
        let r_mid = params.spot_rate(2.0);
        let r_long = params.spot_rate(20.0);

        assert!(r_mid > r_short);
        assert!(r_mid > r_long);
    }

    #[test]
    fn test_array_round_trip() {
        let params = typical();
        assert_eq!(SvenssonParams::from_array(params.to_array()), params);
    }

    #[test]
    fn test_serde() {
        let params = typical();
        let json = serde_json::to_string(&params).unwrap();
        let back: SvenssonParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
