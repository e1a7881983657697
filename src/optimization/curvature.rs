//! curvature — second-order diagnostics at a candidate optimum.
//!
//! Purpose
//! -------
//! Answer "is this point a local minimum?" for a point returned by one of
//! the minimizers. The conjugate-gradient method stops when line searches
//! stall, which also happens at saddle points and on flat ridges; the
//! smallest Hessian eigenvalue tells the two apart.
//!
//! Key behaviors
//! -------------
//! - [`min_curvature`] builds a finite-difference Hessian from the
//!   evaluator's gradient, copies it into a `nalgebra::DMatrix`, and
//!   returns the smallest eigenvalue of its symmetric eigendecomposition.
//! - [`is_local_minimum`] combines a gradient-norm test with a
//!   non-negative-curvature test.
//!
//! Conventions
//! -----------
//! - Eigenvalues within `curvature_tol` below zero are read as zero, so flat
//!   directions (e.g. a rank-deficient design) still count as minima.
use crate::optimization::{
    conjugate_gradient::{CostEvaluator, Hessian, Theta, compute_hessian},
    errors::{OptError, OptResult},
};
use nalgebra::DMatrix;

/// Smallest eigenvalue of the finite-difference Hessian at `theta`.
///
/// # Errors
/// - Propagates [`compute_hessian`] failures.
/// - [`OptError::InvalidHessian`] if the eigendecomposition yields a
///   non-finite eigenvalue.
pub fn min_curvature<E: CostEvaluator + ?Sized>(evaluator: &E, theta: &Theta) -> OptResult<f64> {
    let hess = compute_hessian(evaluator, theta)?;
    if hess.is_empty() {
        return Ok(0.0);
    }
    let eigen = to_dmatrix(&hess).symmetric_eigen();
    let min = eigen.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return Err(OptError::InvalidHessian { row: 0, col: 0, value: min });
    }
    Ok(min)
}

/// `true` when `‖∇f(θ)‖ ≤ grad_tol` and the Hessian has no eigenvalue
/// below `-curvature_tol`.
///
/// # Errors
/// - [`OptError::NonFiniteCost`] if the evaluator fails at `theta`.
/// - Propagates [`min_curvature`] failures.
pub fn is_local_minimum<E: CostEvaluator + ?Sized>(
    evaluator: &E, theta: &Theta, grad_tol: f64, curvature_tol: f64,
) -> OptResult<bool> {
    let (cost, grad) = evaluator.evaluate(theta);
    if !cost.is_finite() {
        return Err(OptError::NonFiniteCost { value: cost });
    }
    if grad.dot(&grad).sqrt() > grad_tol {
        return Ok(false);
    }
    Ok(min_curvature(evaluator, theta)? >= -curvature_tol)
}

fn to_dmatrix(hess: &Hessian) -> DMatrix<f64> {
    DMatrix::from_fn(hess.nrows(), hess.ncols(), |i, j| hess[[i, j]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::conjugate_gradient::{Grad, minimize};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn saddle(x: &Theta) -> (f64, Grad) {
        (x[0] * x[0] - x[1] * x[1], array![2.0 * x[0], -2.0 * x[1]])
    }

    fn bowl(x: &Theta) -> (f64, Grad) {
        (x[0] * x[0] + 3.0 * x[1] * x[1], array![2.0 * x[0], 6.0 * x[1]])
    }

    #[test]
    fn min_curvature_reads_smallest_eigenvalue() {
        assert_abs_diff_eq!(min_curvature(&bowl, &array![0.0, 0.0]).unwrap(), 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(
            min_curvature(&saddle, &array![0.0, 0.0]).unwrap(),
            -2.0,
            epsilon = 1e-5
        );
    }

    #[test]
    // Purpose
    // -------
    // A stationary point is only reported as a minimum when curvature is
    // non-negative.
    fn saddle_is_not_a_local_minimum() {
        let origin = array![0.0, 0.0];

        assert!(is_local_minimum(&bowl, &origin, 1e-8, 1e-6).unwrap());
        assert!(!is_local_minimum(&saddle, &origin, 1e-8, 1e-6).unwrap());
        assert!(!is_local_minimum(&bowl, &array![1.0, 0.0], 1e-8, 1e-6).unwrap());
    }

    #[test]
    fn minimizer_output_passes_curvature_check() {
        let theta = minimize(&bowl, array![2.0, -1.0], 100);

        assert!(is_local_minimum(&bowl, &theta, 1e-5, 1e-6).unwrap());
    }
}
