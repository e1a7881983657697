//! Entry points of the conjugate-gradient minimizer.
//!
//! [`minimize`] is the plain form used by the trainers: start point in,
//! best point out. [`minimize_with_options`] exposes the budget knobs and
//! returns the full [`CgOutcome`] with counters and the cost trace.
use crate::optimization::conjugate_gradient::{
    run::run_cg,
    traits::{CgOptions, CgOutcome, CostEvaluator},
    types::Theta,
};

/// Minimize a differentiable cost starting from `x0`.
///
/// # Behavior
/// - Runs at most `max_iter` line searches (outer iterations).
/// - Stops early when two consecutive line searches fail, which is how the
///   method reports convergence.
/// - Never fails: non-finite evaluations are absorbed by the line search,
///   and an unusable start point is returned unchanged.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_mlopt::optimization::conjugate_gradient::{minimize, Theta};
///
/// let bowl = |x: &Theta| {
///     let d = x - &array![1.0, -2.0];
///     (d.dot(&d), 2.0 * &d)
/// };
/// let theta = minimize(&bowl, array![0.0, 0.0], 100);
/// assert!((theta[0] - 1.0).abs() < 1e-4 && (theta[1] + 2.0).abs() < 1e-4);
/// ```
pub fn minimize<E: CostEvaluator + ?Sized>(evaluator: &E, x0: Theta, max_iter: usize) -> Theta {
    let opts = CgOptions { record_trace: false, ..CgOptions::with_max_iter(max_iter) };
    run_cg(evaluator, x0, &opts).theta_hat
}

/// Minimize with explicit options and return the full outcome.
///
/// See [`CgOptions`] for the knobs and [`CgOutcome`] for the diagnostics.
pub fn minimize_with_options<E: CostEvaluator + ?Sized>(
    evaluator: &E, x0: Theta, opts: &CgOptions,
) -> CgOutcome {
    run_cg(evaluator, x0, opts)
}
