//! End-to-end calibration tests: fit a curve to synthetic Treasury
//! observations and verify the fitted surface reproduces the market.

use approx::assert_relative_eq;
use tsyfit_curves::calibration::{
    fit_yields, FitConfig, MarketObservation, StartingPoint,
};
use tsyfit_curves::sampling::{spot_rate, yield_curve};
use tsyfit_curves::svensson::SvenssonParams;
use tsyfit_curves::CurveError;

/// Standard Treasury tenors in years.
const TENORS: [f64; 11] = [
    1.0 / 12.0,
    0.25,
    0.5,
    1.0,
    2.0,
    3.0,
    5.0,
    7.0,
    10.0,
    20.0,
    30.0,
];

fn observations_from(truth: &SvenssonParams) -> Vec<MarketObservation> {
    TENORS
        .iter()
        .map(|&t| MarketObservation::new(t, truth.spot_rate(t)))
        .collect()
}

#[test]
fn recovers_upward_sloping_curve() {
    // Typical post-inversion shape: 4.2% long end, short end ~60bp lower,
    // mild mid-curve hump.
    let truth = SvenssonParams::new(0.042, -0.006, 0.004, -0.002, 1.8, 9.0);
    let observations = observations_from(&truth);

    let fit = fit_yields(&observations, &FitConfig::default()).unwrap();

    assert!(fit.sum_squared_error < 1e-6);
    assert_eq!(fit.data_points, observations.len());
    assert!(fit.rmse() < 1e-3);

    // The fitted surface must match the truth curve at every observed
    // tenor; individual parameters may differ (the model is not
    // identified from 11 points alone).
    for obs in &observations {
        let fitted = fit.parameters.spot_rate(obs.term);
        assert!(
            (fitted - obs.yield_value).abs() < 1e-3,
            "tenor {}: fitted {fitted} vs observed {}",
            obs.term,
            obs.yield_value
        );
    }
}

#[test]
fn recovers_inverted_curve() {
    // Inverted front end: short rates above the long-run level
    let truth = SvenssonParams::new(0.038, 0.014, -0.01, 0.0, 1.2, 5.0);
    let observations = observations_from(&truth);

    let fit = fit_yields(&observations, &FitConfig::default()).unwrap();

    assert!(fit.sum_squared_error < 1e-6);
    let short = fit.parameters.spot_rate(0.25);
    let long = fit.parameters.spot_rate(30.0);
    assert!(short > long, "inversion lost: {short} vs {long}");
}

#[test]
fn recovers_parameters_from_nearby_start() {
    // Noise-free observations from a curve with well-separated decay
    // factors: started near the truth with a tight tolerance, the
    // optimizer recovers every individual parameter, not just the
    // fitted surface.
    let truth = SvenssonParams::new(0.045, -0.012, 0.020, -0.015, 1.0, 12.0);
    let observations = observations_from(&truth);

    let start = SvenssonParams::new(0.044, -0.010, 0.018, -0.013, 1.2, 11.0);
    let mut config = FitConfig::default()
        .with_starting_point(StartingPoint::Fixed(start))
        .with_max_iterations(10_000);
    config.optimizer = config.optimizer.with_tolerance(1e-18);

    let fit = fit_yields(&observations, &config).unwrap();

    let recovered = fit.parameters.to_array();
    let expected = truth.to_array();
    for (i, (r, e)) in recovered.iter().zip(expected.iter()).enumerate() {
        assert!(
            (r - e).abs() < 1e-3,
            "parameter {i}: recovered {r} vs true {e}"
        );
    }
}

#[test]
fn warm_start_refits_after_small_shift() {
    // A daily refit workflow: fit once, shift the market by 10bp,
    // refit starting from the previous parameters.
    let truth = SvenssonParams::new(0.042, -0.006, 0.004, -0.002, 1.8, 9.0);
    let observations = observations_from(&truth);
    let first = fit_yields(&observations, &FitConfig::default()).unwrap();

    let shifted: Vec<MarketObservation> = observations
        .iter()
        .map(|o| MarketObservation::new(o.term, o.yield_value + 0.001))
        .collect();

    let config = FitConfig::default()
        .with_starting_point(StartingPoint::Fixed(first.parameters));
    let second = fit_yields(&shifted, &config).unwrap();

    assert!(second.sum_squared_error < 1e-6);
    assert_relative_eq!(
        second.parameters.spot_rate(10.0),
        first.parameters.spot_rate(10.0) + 0.001,
        epsilon = 1e-3
    );
}

#[test]
fn insufficient_observations_is_an_error() {
    let observations = vec![
        MarketObservation::new(2.0, 0.041),
        MarketObservation::new(10.0, 0.044),
        MarketObservation::new(30.0, 0.046),
    ];

    match fit_yields(&observations, &FitConfig::default()) {
        Err(CurveError::InsufficientData { required, actual }) => {
            assert_eq!(required, 6);
            assert_eq!(actual, 3);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn fitted_curve_samples_cleanly() {
    let truth = SvenssonParams::new(0.042, -0.006, 0.004, -0.002, 1.8, 9.0);
    let fit = fit_yields(&observations_from(&truth), &FitConfig::default()).unwrap();

    let points: Vec<_> = yield_curve(&fit.parameters, 60, 0.5, 30.0).collect();
    assert_eq!(points.len(), 60);
    assert!(points.windows(2).all(|w| w[0].maturity < w[1].maturity));

    // Point evaluation agrees with the sampled traversal, in percent
    let ten_year = spot_rate(10.0, &fit.parameters).unwrap();
    assert_relative_eq!(ten_year, truth.spot_rate(10.0) * 100.0, epsilon = 0.1);
}
