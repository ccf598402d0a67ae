//! Nelder-Mead simplex optimization.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::optimization::Bounds;

/// Configuration for the Nelder-Mead simplex optimizer.
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Convergence tolerance on the simplex value range
    /// (`worst - best`).
    pub tolerance: f64,
    /// Reflection coefficient.
    pub reflection: f64,
    /// Expansion coefficient.
    pub expansion: f64,
    /// Contraction coefficient.
    pub contraction: f64,
    /// Shrink factor toward the best vertex.
    pub shrink: f64,
    /// Initial perturbation as a fraction of each dimension's bound
    /// range.
    pub step_fraction: f64,
    /// Fixed perturbation for unbounded dimensions.
    pub unbounded_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000,
            tolerance: 1e-10,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
            step_fraction: 0.05,
            unbounded_step: 0.1,
        }
    }
}

impl NelderMeadConfig {
    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a simplex optimization run.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// The best point found.
    pub x: Vec<f64>,
    /// Objective value at the best point.
    pub fx: f64,
    /// Number of completed iterations.
    pub iterations: u32,
}

/// Minimizes a scalar objective over R^n without gradients.
///
/// Standard Nelder-Mead direct search: n+1 vertices are sorted by
/// value each iteration, and the worst is replaced via reflection,
/// expansion, or contraction through the centroid of the rest; when
/// none of those improve, all non-best vertices shrink toward the
/// best.
///
/// When `bounds` are supplied every candidate vertex is clamped into
/// its box before evaluation, so the search can settle on a bound face
/// while remaining feasible throughout. This is the usual bounded
/// compromise, not true constrained optimization; physical parameters
/// like decay constants are well served by it.
///
/// The optimizer itself has no failure mode: once the inputs validate
/// it always returns the best vertex found, whether or not the range
/// tolerance was met. Plausibility of the fit is the caller's problem,
/// typically handled with penalty values inside the objective.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` when `initial` is empty or its
/// dimension does not match `bounds`.
pub fn nelder_mead<F>(
    mut f: F,
    initial: &[f64],
    bounds: Option<&Bounds>,
    config: &NelderMeadConfig,
) -> MathResult<SimplexResult>
where
    F: FnMut(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input("initial point must be non-empty"));
    }
    if let Some(b) = bounds {
        if b.dimension() != n {
            return Err(MathError::invalid_input(format!(
                "bounds dimension {} does not match initial point dimension {n}",
                b.dimension()
            )));
        }
    }

    let clamp = |x: Vec<f64>| -> Vec<f64> {
        match bounds {
            Some(b) => b.clamp(&x),
            None => x,
        }
    };

    // Initial simplex: vertex 0 is the clipped guess, vertex i is the
    // guess perturbed in dimension i-1.
    let x0 = clamp(initial.to_vec());
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    let mut values: Vec<f64> = Vec::with_capacity(n + 1);

    simplex.push(x0.clone());
    values.push(f(&x0));

    for d in 0..n {
        let step = match bounds {
            Some(b) => {
                let range = b.range(d);
                if range.is_finite() && range > 0.0 {
                    range * config.step_fraction
                } else {
                    config.unbounded_step
                }
            }
            None => config.unbounded_step,
        };

        let mut x = x0.clone();
        x[d] += step;
        let x = clamp(x);
        values.push(f(&x));
        simplex.push(x);
    }

    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        // Sort ascending by objective value
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
        simplex = order.iter().map(|&i| simplex[i].clone()).collect();
        values = order.iter().map(|&i| values[i]).collect();

        if values[n] - values[0] < config.tolerance {
            break;
        }
        iterations += 1;

        // Centroid of the best n vertices
        let centroid: Vec<f64> = (0..n)
            .map(|d| simplex.iter().take(n).map(|x| x[d]).sum::<f64>() / n as f64)
            .collect();

        // Reflection
        let reflected: Vec<f64> = (0..n)
            .map(|d| centroid[d] + config.reflection * (centroid[d] - simplex[n][d]))
            .collect();
        let reflected = clamp(reflected);
        let f_reflected = f(&reflected);

        if f_reflected < values[0] {
            // Expansion
            let expanded: Vec<f64> = (0..n)
                .map(|d| centroid[d] + config.expansion * (reflected[d] - centroid[d]))
                .collect();
            let expanded = clamp(expanded);
            let f_expanded = f(&expanded);

            if f_expanded < f_reflected {
                simplex[n] = expanded;
                values[n] = f_expanded;
            } else {
                simplex[n] = reflected;
                values[n] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[n - 1] {
            simplex[n] = reflected;
            values[n] = f_reflected;
            continue;
        }

        // Contraction toward the worst vertex
        let contracted: Vec<f64> = (0..n)
            .map(|d| centroid[d] + config.contraction * (simplex[n][d] - centroid[d]))
            .collect();
        let contracted = clamp(contracted);
        let f_contracted = f(&contracted);

        if f_contracted < values[n] {
            simplex[n] = contracted;
            values[n] = f_contracted;
            continue;
        }

        // Shrink all non-best vertices toward the best
        let best = simplex[0].clone();
        for i in 1..=n {
            for d in 0..n {
                simplex[i][d] = best[d] + config.shrink * (simplex[i][d] - best[d]);
            }
            simplex[i] = clamp(std::mem::take(&mut simplex[i]));
            values[i] = f(&simplex[i]);
        }
    }

    let best_idx = (0..=n)
        .min_by(|&i, &j| values[i].total_cmp(&values[j]))
        .unwrap_or(0);

    debug!(
        "nelder-mead finished: fx={:.6e} after {} iterations",
        values[best_idx], iterations
    );

    Ok(SimplexResult {
        x: simplex[best_idx].clone(),
        fx: values[best_idx],
        iterations,
    })
}
