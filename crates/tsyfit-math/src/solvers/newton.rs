//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Step size for central-difference derivatives.
const NUMERICAL_H: f64 = 1e-6;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Quadratic convergence near the root, but requires the derivative.
///
/// # Errors
///
/// Returns `MathError::DivisionByZero` when the derivative flattens
/// out, or `MathError::ConvergenceFailed` when the iteration budget is
/// exhausted. Callers typically fall back to [`bisection`] on error.
///
/// [`bisection`]: crate::solvers::bisection
///
/// # Example
///
/// ```rust
/// use tsyfit_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);

        if dfx.abs() < 1e-12 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::convergence_failed(iteration + 1, fx.abs()));
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Newton-Raphson with a central-difference derivative.
///
/// Uses `(f(x + h) - f(x - h)) / 2h` with `h = 1e-6` when an
/// analytical derivative is not available.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = |x: f64| (f(x + NUMERICAL_H) - f(x - NUMERICAL_H)) / (2.0 * NUMERICAL_H);
    newton_raphson(&f, df, initial_guess, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |x: f64| x * x * x - 27.0;

        let result = newton_raphson_numerical(f, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-7);
    }

    #[test]
    fn test_zero_derivative_error() {
        // f(x) = x^3 - 1 with initial guess at 0 has zero derivative
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        // Tight tolerance with a tiny budget
        let f = |x: f64| x.exp() - 10.0;
        let df = |x: f64| x.exp();

        let config = SolverConfig::new(1e-15, 2);
        let result = newton_raphson(f, df, 10.0, &config);

        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
